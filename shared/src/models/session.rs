//! Dashboard session state machine
//!
//! A session walks through four steps. Transitions are pure: applying an
//! action to a state yields a new state or an error, and the caller decides
//! what to do with either.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cluster::{classify, ClusterId};
use super::profile::{ProfileForm, UserProfile};
use crate::validation::{field_violations, validate_profile};

/// Number of steps in the dashboard
pub const STEP_COUNT: u8 = 4;

/// Dashboard step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    ProfileInput,
    ZoneReveal,
    ResourcePlan,
    Tracking,
}

impl Step {
    /// One-based step number
    pub fn number(&self) -> u8 {
        match self {
            Step::ProfileInput => 1,
            Step::ZoneReveal => 2,
            Step::ResourcePlan => 3,
            Step::Tracking => 4,
        }
    }

    /// Progress bar value for the sidebar
    pub fn progress_percent(&self) -> u8 {
        match self {
            Step::ProfileInput => 25,
            Step::ZoneReveal => 50,
            Step::ResourcePlan => 75,
            Step::Tracking => 100,
        }
    }

    /// Actions that are valid from this step
    pub fn available_actions(&self) -> &'static [ActionKind] {
        match self {
            Step::ProfileInput => &[ActionKind::SubmitProfile],
            Step::ZoneReveal => &[ActionKind::ViewPlan, ActionKind::Restart],
            Step::ResourcePlan => &[ActionKind::ViewTracking, ActionKind::Restart],
            Step::Tracking => &[ActionKind::Back, ActionKind::Restart],
        }
    }
}

impl TryFrom<u8> for Step {
    type Error = TransitionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Step::ProfileInput),
            2 => Ok(Step::ZoneReveal),
            3 => Ok(Step::ResourcePlan),
            4 => Ok(Step::Tracking),
            other => Err(TransitionError::InvalidStep(other)),
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {} of {}", self.number(), STEP_COUNT)
    }
}

/// A user action on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SubmitProfile {
        #[serde(default)]
        profile: ProfileForm,
    },
    ViewPlan,
    ViewTracking,
    Back,
    Restart,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SubmitProfile { .. } => ActionKind::SubmitProfile,
            Action::ViewPlan => ActionKind::ViewPlan,
            Action::ViewTracking => ActionKind::ViewTracking,
            Action::Back => ActionKind::Back,
            Action::Restart => ActionKind::Restart,
        }
    }
}

/// Payload-free action discriminant, used for button lists and errors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SubmitProfile,
    ViewPlan,
    ViewTracking,
    Back,
    Restart,
}

impl ActionKind {
    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::SubmitProfile => "Analyze Soil & Generate Plan",
            ActionKind::ViewPlan => "View Proactive Resource Plan",
            ActionKind::ViewTracking => "View Forecast Tracking",
            ActionKind::Back => "Back to Resource Plan",
            ActionKind::Restart => "Start New Analysis",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("invalid transition from {from:?} using action {action:?}")]
    InvalidTransition { from: Step, action: ActionKind },
    #[error("invalid profile: {message}")]
    InvalidProfile { field: String, message: String },
    #[error("step {0} is not a dashboard step")]
    InvalidStep(u8),
    #[error("session invariant violation: {0}")]
    InvariantViolation(String),
}

/// State of one dashboard session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub step: Step,
    /// Present once the profile has been submitted
    pub profile: Option<UserProfile>,
    /// Present once the profile has been classified
    pub cluster: Option<ClusterId>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh session on the profile input step
    pub fn new() -> Self {
        Self {
            step: Step::ProfileInput,
            profile: None,
            cluster: None,
        }
    }

    /// Profile and cluster must be present exactly when past step 1
    pub fn check_invariants(&self) -> Result<(), TransitionError> {
        let past_input = self.step != Step::ProfileInput;
        match (past_input, self.profile.is_some(), self.cluster.is_some()) {
            (true, true, true) | (false, false, false) => Ok(()),
            (true, _, _) => Err(TransitionError::InvariantViolation(format!(
                "{:?} requires a submitted profile and cluster",
                self.step
            ))),
            (false, _, _) => Err(TransitionError::InvariantViolation(
                "profile input step must not carry a profile or cluster".to_string(),
            )),
        }
    }

    /// Profile and cluster for steps past profile input
    pub fn classified(&self) -> Result<(&UserProfile, ClusterId), TransitionError> {
        match (&self.profile, self.cluster) {
            (Some(profile), Some(cluster)) => Ok((profile, cluster)),
            _ => Err(TransitionError::InvariantViolation(format!(
                "{:?} has no classified profile",
                self.step
            ))),
        }
    }

    /// Apply an action, producing the next state
    ///
    /// Restart is accepted from any state, even one that fails
    /// [`check_invariants`](Self::check_invariants).
    pub fn apply(&self, action: Action) -> Result<SessionState, TransitionError> {
        if action == Action::Restart {
            return Ok(SessionState::new());
        }
        self.check_invariants()?;

        match (self.step, action) {
            (Step::ProfileInput, Action::SubmitProfile { profile }) => {
                let profile = profile.into_profile();
                check_profile(&profile)?;
                let cluster = classify(&profile);
                Ok(SessionState {
                    step: Step::ZoneReveal,
                    profile: Some(profile),
                    cluster: Some(cluster),
                })
            }
            (Step::ZoneReveal, Action::ViewPlan) => Ok(self.at(Step::ResourcePlan)),
            (Step::ResourcePlan, Action::ViewTracking) => Ok(self.at(Step::Tracking)),
            (Step::Tracking, Action::Back) => Ok(self.at(Step::ResourcePlan)),
            (from, action) => Err(TransitionError::InvalidTransition {
                from,
                action: action.kind(),
            }),
        }
    }

    fn at(&self, step: Step) -> SessionState {
        SessionState {
            step,
            ..self.clone()
        }
    }
}

/// Out-of-range values never reach the classifier
fn check_profile(profile: &UserProfile) -> Result<(), TransitionError> {
    validate_profile(profile).map_err(|errors| {
        match field_violations(&errors).into_iter().next() {
            Some(violation) => TransitionError::InvalidProfile {
                field: violation.field,
                message: violation.message,
            },
            None => TransitionError::InvalidProfile {
                field: String::new(),
                message: errors.to_string(),
            },
        }
    })
}

//! View renderers for the four dashboard steps
//!
//! Each renderer is a pure function of session state (plus a random source
//! for the tracking step) that produces a page model for the rendering
//! surface. [`render_page`] routes a session to exactly one of them.

use rand::Rng;
use serde::Serialize;
use shared::{
    profile_field_specs, radar_comparison, time_series_comparison, tracking_series, ActionKind,
    FieldSection, FieldSpec, Granularity, RadarChart, RecommendationRule, ReferenceData,
    ResourceCategory, SessionState, Step, TimeSeriesChart, TrackingSummary, UserProfile,
    YieldSample,
};

use crate::error::AppResult;

pub const APP_TITLE: &str = "Agri-Forecast: Proactive Crop and Resource Planning";

const SIDEBAR_TITLE: &str = "Agri-Forecast";
const SIDEBAR_SUBTITLE: &str = "Proactive Crop & Resource Planning";
const SIDEBAR_INFO: &str =
    "This tool uses unsupervised machine learning (K-Means Clustering & Apriori Association Mining).";

/// A rendered page: chrome shared by every step plus the step's view
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub sidebar: Sidebar,
    pub progress: Progress,
    pub actions: Vec<ActionButton>,
    pub view: View,
}

/// Sidebar header and blurb
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Sidebar {
    pub title: String,
    pub subtitle: String,
    pub info: String,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            title: SIDEBAR_TITLE.to_string(),
            subtitle: SIDEBAR_SUBTITLE.to_string(),
            info: SIDEBAR_INFO.to_string(),
        }
    }
}

/// Sidebar progress indicator
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Progress {
    pub step: u8,
    pub total: u8,
    pub percent: u8,
    pub label: String,
}

impl From<Step> for Progress {
    fn from(step: Step) -> Self {
        Self {
            step: step.number(),
            total: shared::STEP_COUNT,
            percent: step.progress_percent(),
            label: step.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActionButton {
    pub action: ActionKind,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    ProfileInput(ProfileInputView),
    ZoneReveal(ZoneRevealView),
    ResourcePlan(ResourcePlanView),
    Tracking(TrackingView),
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileInputView {
    pub heading: String,
    pub intro: String,
    pub sections: Vec<FormSection>,
    pub defaults: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSection {
    pub section: FieldSection,
    pub title: String,
    pub hint: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneRevealView {
    pub heading: String,
    pub headline: String,
    /// One-based cluster number
    pub cluster_number: u16,
    pub metrics: Vec<MetricCard>,
    pub radar: RadarChart,
    pub insight: Insight,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Insight {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourcePlanView {
    pub heading: String,
    pub crop: String,
    pub basis: String,
    pub rules: Vec<RuleCard>,
    pub summary: ExecutiveSummary,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RuleCard {
    /// One-based position in the basket
    pub position: usize,
    pub item: String,
    pub description: String,
    pub category: ResourceCategory,
    pub confidence: String,
    pub lift: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExecutiveSummary {
    pub key_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackingView {
    pub heading: String,
    pub intro: String,
    pub panels: Vec<TrackingPanel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackingPanel {
    pub granularity: Granularity,
    pub title: String,
    pub samples: Vec<YieldSample>,
    pub summary: TrackingSummary,
    pub chart: TimeSeriesChart,
}

/// Render the page for a session's current step
pub fn render_page<R: Rng + ?Sized>(
    state: &SessionState,
    reference: &ReferenceData,
    rng: &mut R,
) -> AppResult<Page> {
    state.check_invariants()?;

    let view = match state.step {
        Step::ProfileInput => View::ProfileInput(render_profile_input()),
        Step::ZoneReveal => View::ZoneReveal(render_zone_reveal(state, reference)?),
        Step::ResourcePlan => View::ResourcePlan(render_resource_plan(state, reference)?),
        Step::Tracking => View::Tracking(render_tracking(rng)),
    };

    Ok(Page {
        title: APP_TITLE.to_string(),
        sidebar: Sidebar::default(),
        progress: Progress::from(state.step),
        actions: state
            .step
            .available_actions()
            .iter()
            .map(|action| ActionButton {
                action: *action,
                label: action.label().to_string(),
            })
            .collect(),
        view,
    })
}

pub fn render_profile_input() -> ProfileInputView {
    let fields = profile_field_specs();
    let sections = [FieldSection::Soil, FieldSection::Climate]
        .into_iter()
        .map(|section| FormSection {
            section,
            title: section.title().to_string(),
            hint: section.hint().to_string(),
            fields: fields
                .iter()
                .filter(|f| f.section == section)
                .cloned()
                .collect(),
        })
        .collect();

    ProfileInputView {
        heading: "Farmer Profile Input".to_string(),
        intro: "Enter your pre-season soil test results and environmental forecasts to begin the unsupervised analysis."
            .to_string(),
        sections,
        defaults: UserProfile::default(),
    }
}

pub fn render_zone_reveal(
    state: &SessionState,
    reference: &ReferenceData,
) -> AppResult<ZoneRevealView> {
    let (profile, cluster_id) = state.classified()?;
    let cluster = reference.cluster_profile(cluster_id)?;

    Ok(ZoneRevealView {
        heading: "Phase A Result: Cluster Identification".to_string(),
        headline: format!(
            "Your farm's micro-climate archetype has been identified as: {}",
            cluster_id
        ),
        cluster_number: cluster_id.display_number(),
        metrics: vec![
            MetricCard {
                label: "Cluster Zone Type".to_string(),
                value: cluster.name.clone(),
                delta: None,
            },
            MetricCard {
                label: "Recommended Crop".to_string(),
                value: cluster.crop.clone(),
                delta: Some("Highest Historical Yield".to_string()),
            },
            MetricCard {
                label: "Cluster Match Score".to_string(),
                value: cluster.match_score.clone(),
                delta: None,
            },
        ],
        radar: radar_comparison(cluster, profile),
        insight: Insight {
            title: format!("Why {}?", cluster.crop),
            text: format!(
                "Your input parameters (blue shape) heavily overlap with the historical success zone of {} (green shape).",
                cluster_id
            ),
        },
        profile: *profile,
    })
}

pub fn render_resource_plan(
    state: &SessionState,
    reference: &ReferenceData,
) -> AppResult<ResourcePlanView> {
    let (_, cluster_id) = state.classified()?;
    let plan = reference.plan_for_cluster(cluster_id)?;
    let crop = plan.cluster.crop.clone();

    Ok(ResourcePlanView {
        heading: format!("Phase B: Proactive Resource Plan for {}", crop),
        basis: "Based on Association Rule Mining (Apriori) of the top 25% highest yielding farms historically found in your cluster."
            .to_string(),
        rules: plan
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| rule_card(i + 1, rule))
            .collect(),
        summary: executive_summary(plan.rules),
        crop,
    })
}

fn rule_card(position: usize, rule: &RecommendationRule) -> RuleCard {
    RuleCard {
        position,
        item: rule.item.clone(),
        description: rule.description.clone(),
        category: rule.category,
        confidence: rule.confidence.clone(),
        lift: rule.lift_label(),
    }
}

/// Secure the first resource, prepare for the rest
pub fn executive_summary(rules: &[RecommendationRule]) -> ExecutiveSummary {
    let key_actions = rules
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            if i == 0 {
                format!("Secure {}.", rule.item)
            } else {
                format!("Prepare for {}.", rule.item)
            }
        })
        .collect();
    ExecutiveSummary { key_actions }
}

pub fn render_tracking<R: Rng + ?Sized>(rng: &mut R) -> TrackingView {
    TrackingView {
        heading: "Forecast & Yield Tracking".to_string(),
        intro: "Monitor your farm's performance against forecasts over time.".to_string(),
        panels: Granularity::ALL
            .into_iter()
            .map(|granularity| render_tracking_panel(granularity, &mut *rng))
            .collect(),
    }
}

/// One tracking tab with freshly drawn samples
pub fn render_tracking_panel<R: Rng + ?Sized>(
    granularity: Granularity,
    rng: &mut R,
) -> TrackingPanel {
    let samples = tracking_series(granularity, rng);
    tracking_panel(granularity, samples)
}

pub fn tracking_panel(granularity: Granularity, samples: Vec<YieldSample>) -> TrackingPanel {
    TrackingPanel {
        granularity,
        title: format!("{} Performance", granularity),
        summary: TrackingSummary::from_samples(&samples),
        chart: time_series_comparison(granularity, &samples),
        samples,
    }
}

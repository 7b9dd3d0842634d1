//! Session service: owns dashboard sessions and drives their transitions

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use shared::{Action, Granularity, ReferenceData, SessionState, Step};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dashboard::{render_page, render_tracking_panel, Page, TrackingPanel};
use super::tracking::SeriesSource;
use crate::error::{AppError, AppResult};

/// In-memory session table; nothing survives a restart
pub type SessionStore = Arc<RwLock<HashMap<Uuid, SessionEntry>>>;

/// A session's state and when it was last touched
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub state: SessionState,
    pub last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn new(state: SessionState, now: DateTime<Utc>) -> Self {
        Self {
            state,
            last_seen: now,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        now - self.last_seen > idle_timeout
    }
}

pub fn new_session_store() -> SessionStore {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Session service for walking users through the dashboard
#[derive(Clone)]
pub struct SessionService {
    sessions: SessionStore,
    reference: Arc<ReferenceData>,
    series: Arc<SeriesSource>,
    idle_timeout: Duration,
}

/// A session id together with its rendered page
#[derive(Debug, Clone, Serialize)]
pub struct SessionPage {
    pub session_id: Uuid,
    pub page: Page,
}

impl SessionService {
    /// Create a new SessionService instance
    pub fn new(
        sessions: SessionStore,
        reference: Arc<ReferenceData>,
        series: Arc<SeriesSource>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            sessions,
            reference,
            series,
            idle_timeout,
        }
    }

    /// Start a session on the profile input step
    ///
    /// Sessions idle for longer than the timeout are dropped first.
    pub async fn create_session(&self) -> AppResult<SessionPage> {
        let session_id = Uuid::new_v4();
        let state = SessionState::new();
        let now = Utc::now();

        {
            let mut sessions = self.sessions.write().await;
            let before = sessions.len();
            sessions.retain(|_, entry| !entry.is_expired(now, self.idle_timeout));
            let pruned = before - sessions.len();
            if pruned > 0 {
                tracing::info!(pruned, "Idle sessions expired");
            }
            sessions.insert(session_id, SessionEntry::new(state.clone(), now));
        }
        tracing::info!(%session_id, "Session created");

        self.render(session_id, &state)
    }

    /// Render the current step of a session
    pub async fn current_page(&self, session_id: Uuid) -> AppResult<SessionPage> {
        let state = self.state(session_id).await?;
        self.render(session_id, &state)
    }

    /// Apply a user action and render the resulting step
    ///
    /// A rejected action leaves the session untouched.
    pub async fn apply_action(&self, session_id: Uuid, action: Action) -> AppResult<SessionPage> {
        let kind = action.kind();
        let now = Utc::now();
        let next = {
            let mut sessions = self.sessions.write().await;
            let entry = sessions
                .get_mut(&session_id)
                .filter(|entry| !entry.is_expired(now, self.idle_timeout))
                .ok_or_else(|| AppError::NotFound(format!("Session {}", session_id)))?;
            entry.last_seen = now;

            let current = &mut entry.state;
            let from = current.step;
            match current.apply(action) {
                Ok(next) => {
                    tracing::info!(
                        %session_id,
                        action = ?kind,
                        from = from.number(),
                        to = next.step.number(),
                        "Session transition applied"
                    );
                    *current = next.clone();
                    next
                }
                Err(err) => {
                    tracing::warn!(%session_id, action = ?kind, from = from.number(), error = %err, "Session transition rejected");
                    return Err(err.into());
                }
            }
        };

        self.render(session_id, &next)
    }

    /// Regenerate a single tracking tab
    pub async fn tracking_panel(
        &self,
        session_id: Uuid,
        granularity: Granularity,
    ) -> AppResult<TrackingPanel> {
        let state = self.state(session_id).await?;
        if state.step != Step::Tracking {
            return Err(AppError::InvalidStateTransition(format!(
                "tracking is not available from {:?}",
                state.step
            )));
        }
        Ok(self
            .series
            .draw(|rng| render_tracking_panel(granularity, rng)))
    }

    /// Drop a session
    pub async fn end_session(&self, session_id: Uuid) -> AppResult<()> {
        match self.sessions.write().await.remove(&session_id) {
            Some(_) => {
                tracing::info!(%session_id, "Session ended");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Session {}", session_id))),
        }
    }

    /// Sessions that have not yet gone idle
    pub async fn session_count(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired(now, self.idle_timeout))
            .count()
    }

    async fn state(&self, session_id: Uuid) -> AppResult<SessionState> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&session_id)
            .filter(|entry| !entry.is_expired(now, self.idle_timeout))
            .ok_or_else(|| AppError::NotFound(format!("Session {}", session_id)))?;
        entry.last_seen = now;
        Ok(entry.state.clone())
    }

    fn render(&self, session_id: Uuid, state: &SessionState) -> AppResult<SessionPage> {
        let page = self
            .series
            .draw(|rng| render_page(state, &self.reference, rng))?;
        Ok(SessionPage { session_id, page })
    }
}

//! Agri-Forecast dashboard server
//!
//! Walks a farmer through a four-step planning flow: profile input, zone
//! reveal, resource plan and yield tracking.

use axum::{routing::get, Router};
use shared::ReferenceData;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::session::{new_session_store, SessionStore};
use services::{SeriesSource, SessionService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reference: Arc<ReferenceData>,
    pub sessions: SessionStore,
    pub series: Arc<SeriesSource>,
}

impl AppState {
    /// Build state with the built-in reference tables and an empty session table
    pub fn new(config: Config) -> Self {
        let series = SeriesSource::new(config.tracking.seed);
        Self {
            config: Arc::new(config),
            reference: Arc::new(ReferenceData::builtin()),
            sessions: new_session_store(),
            series: Arc::new(series),
        }
    }

    /// Session service over the shared session table
    pub fn session_service(&self) -> SessionService {
        SessionService::new(
            self.sessions.clone(),
            self.reference.clone(),
            self.series.clone(),
            chrono::Duration::minutes(self.config.session.idle_timeout_minutes),
        )
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agri-Forecast: Proactive Crop and Resource Planning API v1.0"
}

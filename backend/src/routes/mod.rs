//! Route definitions for the Agri-Forecast API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Form descriptors for the profile input step
        .route("/profile/fields", get(handlers::get_profile_fields))
        // Reference data
        .nest("/clusters", cluster_routes())
        .route("/crops/:crop/rules", get(handlers::get_crop_rules))
        // Dashboard sessions
        .nest("/sessions", session_routes())
}

/// Cluster reference routes
fn cluster_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_clusters))
        .route("/:id", get(handlers::get_cluster))
}

/// Session routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_session))
        .route(
            "/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/:id/actions", post(handlers::apply_action))
        .route(
            "/:id/tracking/:granularity",
            get(handlers::get_tracking_panel),
        )
}

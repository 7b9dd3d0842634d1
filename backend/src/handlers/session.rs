//! Dashboard session HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{Action, Granularity};
use uuid::Uuid;

use crate::AppState;

/// Start a new session on the profile input step
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let service = state.session_service();

    match service.create_session().await {
        Ok(page) => (StatusCode::CREATED, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Render the session's current step
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = state.session_service();

    match service.current_page(session_id).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Apply a user action and render the next step
pub async fn apply_action(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(action): Json<Action>,
) -> impl IntoResponse {
    let service = state.session_service();

    match service.apply_action(session_id, action).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Regenerate one tracking tab
pub async fn get_tracking_panel(
    State(state): State<AppState>,
    Path((session_id, granularity)): Path<(Uuid, Granularity)>,
) -> impl IntoResponse {
    let service = state.session_service();

    match service.tracking_panel(session_id, granularity).await {
        Ok(panel) => (StatusCode::OK, Json(panel)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// End a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = state.session_service();

    match service.end_session(session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

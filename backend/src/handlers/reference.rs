//! Reference data HTTP handlers
//!
//! Keys here come from the client, so a miss is a 404 rather than the
//! configuration error it would be when driven by session state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{profile_field_specs, ClusterId, UserProfile};

use crate::error::AppError;
use crate::AppState;

/// Form widget descriptors and default profile
pub async fn get_profile_fields() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "fields": profile_field_specs(),
            "defaults": UserProfile::default(),
        })),
    )
}

/// List all cluster profiles
pub async fn list_clusters(State(state): State<AppState>) -> impl IntoResponse {
    let clusters: Vec<_> = state.reference.clusters().collect();
    (StatusCode::OK, Json(serde_json::json!({ "clusters": clusters })))
}

/// Get one cluster profile
pub async fn get_cluster(
    State(state): State<AppState>,
    Path(cluster_id): Path<u8>,
) -> impl IntoResponse {
    match state.reference.cluster_profile(ClusterId(cluster_id)) {
        Ok(cluster) => (StatusCode::OK, Json(cluster.clone())).into_response(),
        Err(_) => AppError::NotFound(format!("Cluster {}", cluster_id)).into_response(),
    }
}

/// Get the recommendation rules for a crop
pub async fn get_crop_rules(
    State(state): State<AppState>,
    Path(crop): Path<String>,
) -> impl IntoResponse {
    match state.reference.rules_for_crop(&crop) {
        Ok(rules) => (
            StatusCode::OK,
            Json(serde_json::json!({ "crop": crop, "rules": rules })),
        )
            .into_response(),
        Err(_) => AppError::NotFound(format!("Crop {}", crop)).into_response(),
    }
}

//! End-to-end tests for the dashboard session API
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use agri_forecast_backend::{create_app, AppState, Config};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// ============================================================================
// Helpers
// ============================================================================

fn app() -> Router {
    let mut config = Config::default();
    config.tracking.seed = Some(42);
    create_app(AppState::new(config))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

async fn act(app: &Router, id: &str, action: Value) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/api/v1/sessions/{}/actions", id),
        Some(action),
    )
    .await
}

// ============================================================================
// Session flow
// ============================================================================

#[tokio::test]
async fn test_full_walk_through_all_steps() {
    let app = app();
    let id = create_session(&app).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["progress"]["step"], 1);
    assert_eq!(body["page"]["view"]["kind"], "profile_input");

    let (status, body) = act(
        &app,
        &id,
        json!({ "type": "submit_profile", "profile": { "n": 30, "ph": 6.0 } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["progress"]["step"], 2);
    assert_eq!(body["page"]["progress"]["percent"], 50);
    assert_eq!(body["page"]["view"]["kind"], "zone_reveal");
    assert_eq!(body["page"]["view"]["cluster_number"], 2);

    let (status, body) = act(&app, &id, json!({ "type": "view_plan" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["view"]["kind"], "resource_plan");
    assert_eq!(body["page"]["view"]["crop"], "Chickpea");

    let (status, body) = act(&app, &id, json!({ "type": "view_tracking" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["progress"]["percent"], 100);
    assert_eq!(body["page"]["view"]["panels"].as_array().unwrap().len(), 3);

    let (status, body) = act(&app, &id, json!({ "type": "back" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["progress"]["step"], 3);

    let (status, body) = act(&app, &id, json!({ "type": "restart" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["progress"]["step"], 1);
}

#[tokio::test]
async fn test_submit_without_profile_uses_defaults() {
    let app = app();
    let id = create_session(&app).await;

    // Default nitrogen (50) falls in the loam cluster
    let (status, body) = act(&app, &id, json!({ "type": "submit_profile" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["view"]["cluster_number"], 3);
}

#[tokio::test]
async fn test_invalid_transition_is_unprocessable() {
    let app = app();
    let id = create_session(&app).await;

    let (status, body) = act(&app, &id, json!({ "type": "view_tracking" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_STATE_TRANSITION");

    // Session is untouched
    let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(body["page"]["progress"]["step"], 1);
}

#[tokio::test]
async fn test_submit_after_profile_step_is_unprocessable_even_when_out_of_range() {
    let app = app();
    let id = create_session(&app).await;
    act(&app, &id, json!({ "type": "submit_profile", "profile": { "n": 90 } })).await;
    act(&app, &id, json!({ "type": "view_plan" })).await;

    let (status, body) = act(
        &app,
        &id,
        json!({ "type": "submit_profile", "profile": { "n": 999 } }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_STATE_TRANSITION");

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(body["page"]["progress"]["step"], 3);
    assert_eq!(body["page"]["progress"]["percent"], 75);
}

#[tokio::test]
async fn test_out_of_range_profile_is_rejected() {
    let app = app();
    let id = create_session(&app).await;

    let (status, body) = act(
        &app,
        &id,
        json!({ "type": "submit_profile", "profile": { "humidity": 5 } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "humidity");
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = app();
    let uri = "/api/v1/sessions/00000000-0000-0000-0000-000000000000";

    let (status, body) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_session() {
    let app = app();
    let id = create_session(&app).await;
    let uri = format!("/api/v1/sessions/{}", id);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Tracking panels
// ============================================================================

#[tokio::test]
async fn test_tracking_panel_regenerates_on_tracking_step() {
    let app = app();
    let id = create_session(&app).await;
    let uri = format!("/api/v1/sessions/{}/tracking/quarterly", id);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    act(&app, &id, json!({ "type": "submit_profile", "profile": { "n": 120 } })).await;
    act(&app, &id, json!({ "type": "view_plan" })).await;
    act(&app, &id, json!({ "type": "view_tracking" })).await;

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let samples = body["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[0]["period"], "Q1 2023");
    assert_eq!(body["chart"]["kind"], "grouped_bars");
}

// ============================================================================
// Reference data
// ============================================================================

#[tokio::test]
async fn test_reference_endpoints() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/clusters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clusters"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, Method::GET, "/api/v1/clusters/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crop"], "Rice");

    let (status, _) = send(&app, Method::GET, "/api/v1/clusters/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/v1/crops/Maize/rules", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["rules"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::GET, "/api/v1/crops/Wheat/rules", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/v1/profile/fields", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fields"].as_array().unwrap().len(), 8);
    assert_eq!(body["defaults"]["n"], 50);
}

#[tokio::test]
async fn test_health_reports_sessions() {
    let app = app();
    create_session(&app).await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["active_sessions"], 1);
}

//! WebAssembly module for the Agri-Forecast dashboard
//!
//! Provides client-side computation for:
//! - Zone classification and cluster lookups
//! - Resource recommendations per crop
//! - Radar and time series chart models
//! - Session transitions for offline rendering
//!
//! Structured values cross the boundary as JSON strings.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("Agri-Forecast module loaded"));
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn parse_json<'a, T: serde::Deserialize<'a>>(input: &'a str, what: &str) -> Result<T, String> {
    serde_json::from_str(input).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn cluster_profile(cluster_id: u8) -> Result<String, String> {
    let reference = shared::ReferenceData::builtin();
    let profile = reference
        .cluster_profile(ClusterId(cluster_id))
        .map_err(|e| e.to_string())?;
    to_json(profile)
}

fn crop_rules(crop: &str) -> Result<String, String> {
    let reference = shared::ReferenceData::builtin();
    let rules = reference.rules_for_crop(crop).map_err(|e| e.to_string())?;
    to_json(rules)
}

fn radar_chart(cluster_id: u8, profile_json: &str) -> Result<String, String> {
    let reference = shared::ReferenceData::builtin();
    let cluster = reference
        .cluster_profile(ClusterId(cluster_id))
        .map_err(|e| e.to_string())?;
    let form: ProfileForm = parse_json(profile_json, "profile")?;
    to_json(&shared::radar_comparison(cluster, &form.into_profile()))
}

fn time_series_chart(granularity: &str, samples_json: &str) -> Result<String, String> {
    let granularity: Granularity = granularity.parse()?;
    let samples: Vec<YieldSample> = parse_json(samples_json, "samples")?;
    to_json(&shared::time_series_comparison(granularity, &samples))
}

fn seeded_series(granularity: &str, seed: u64) -> Result<String, String> {
    let granularity: Granularity = granularity.parse()?;
    let mut rng = StdRng::seed_from_u64(seed);
    to_json(&tracking_series(granularity, &mut rng))
}

fn next_state(state_json: &str, action_json: &str) -> Result<String, String> {
    let state: SessionState = parse_json(state_json, "session state")?;
    let action: Action = parse_json(action_json, "action")?;
    let next = state.apply(action).map_err(|e| e.to_string())?;
    to_json(&next)
}

fn clamp_profile(form_json: &str) -> Result<String, String> {
    let form: ProfileForm = parse_json(form_json, "profile")?;
    to_json(&form.into_profile().clamped())
}

/// Cluster id for a nitrogen reading
#[wasm_bindgen]
pub fn classify_nitrogen(n: u32) -> u8 {
    shared::classify_nitrogen(n).0
}

/// Reference profile of a cluster
#[wasm_bindgen]
pub fn cluster_profile_json(cluster_id: u8) -> Result<String, JsValue> {
    cluster_profile(cluster_id).map_err(js_error)
}

/// Recommendation rules for a crop
#[wasm_bindgen]
pub fn rules_for_crop_json(crop: &str) -> Result<String, JsValue> {
    crop_rules(crop).map_err(js_error)
}

/// Radar chart comparing a submitted profile with its cluster
#[wasm_bindgen]
pub fn radar_chart_json(cluster_id: u8, profile_json: &str) -> Result<String, JsValue> {
    radar_chart(cluster_id, profile_json).map_err(js_error)
}

/// Forecast vs actual chart for samples of one granularity
#[wasm_bindgen]
pub fn time_series_chart_json(granularity: &str, samples_json: &str) -> Result<String, JsValue> {
    time_series_chart(granularity, samples_json).map_err(js_error)
}

/// Reproducible yield series
#[wasm_bindgen]
pub fn tracking_series_seeded_json(granularity: &str, seed: u64) -> Result<String, JsValue> {
    seeded_series(granularity, seed).map_err(js_error)
}

/// Fresh yield series seeded from the browser's random source
#[wasm_bindgen]
pub fn tracking_series_json(granularity: &str) -> Result<String, JsValue> {
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    seeded_series(granularity, seed).map_err(js_error)
}

/// Apply a session action to a serialized state
#[wasm_bindgen]
pub fn apply_action_json(state_json: &str, action_json: &str) -> Result<String, JsValue> {
    next_state(state_json, action_json).map_err(js_error)
}

/// Fill missing form fields and pull values into range
#[wasm_bindgen]
pub fn clamp_profile_json(form_json: &str) -> Result<String, JsValue> {
    clamp_profile(form_json).map_err(js_error)
}

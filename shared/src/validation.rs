//! Validation utilities for submitted profiles

use validator::{Validate, ValidationErrors};

use crate::models::UserProfile;

/// A single failed field check, flattened for error responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Validate a profile against the form ranges
pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationErrors> {
    profile.validate()
}

/// Flatten validator output, sorted by field name
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldViolation {
                field: field.to_string(),
                message: describe(field, err),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

fn describe(field: &str, err: &validator::ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match (err.params.get("min"), err.params.get("max"), err.params.get("value")) {
        (Some(min), Some(max), Some(value)) => format!(
            "{} must be between {} and {}, got {}",
            field,
            format_bound(min),
            format_bound(max),
            format_bound(value)
        ),
        _ => format!("{} failed {} check", field, err.code),
    }
}

/// Whole numbers print without a fractional part
fn format_bound(value: &serde_json::Value) -> String {
    match value.as_f64() {
        Some(number) if number.fract() == 0.0 => format!("{}", number as i64),
        Some(number) => number.to_string(),
        None => value.to_string(),
    }
}

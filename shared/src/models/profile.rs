//! Farmer profile models
//!
//! A profile is the set of soil test results and seasonal forecasts a farmer
//! enters on the first step of the dashboard.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{FieldDefault, FieldSection, FieldSpec, Irrigation, WidgetKind};

/// Nitrogen range in mg/kg
pub const NITROGEN_RANGE: (u32, u32) = (0, 140);
/// Phosphorus range in mg/kg
pub const PHOSPHORUS_RANGE: (u32, u32) = (5, 145);
/// Potassium range in mg/kg
pub const POTASSIUM_RANGE: (u32, u32) = (5, 205);
pub const PH_RANGE: (f64, f64) = (0.0, 14.0);
/// Average season temperature range in °C
pub const TEMPERATURE_RANGE: (f64, f64) = (10.0, 50.0);
/// Average humidity range in percent
pub const HUMIDITY_RANGE: (u32, u32) = (10, 100);
/// Expected rainfall range in mm
pub const RAINFALL_RANGE: (u32, u32) = (0, 500);

/// Soil and climate parameters for one farm
///
/// The validator ranges mirror the `*_RANGE` constants above.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
pub struct UserProfile {
    /// Nitrogen (N), mg/kg
    #[validate(range(min = 0, max = 140))]
    pub n: u32,
    /// Phosphorus (P), mg/kg
    #[validate(range(min = 5, max = 145))]
    pub p: u32,
    /// Potassium (K), mg/kg
    #[validate(range(min = 5, max = 205))]
    pub k: u32,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,
    /// Average season temperature, °C
    #[validate(range(min = 10.0, max = 50.0))]
    pub temperature: f64,
    /// Average humidity, percent
    #[validate(range(min = 10, max = 100))]
    pub humidity: u32,
    /// Expected rainfall, mm
    #[validate(range(min = 0, max = 500))]
    pub rainfall: u32,
    pub irrigation: Irrigation,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            n: 50,
            p: 50,
            k: 50,
            ph: 6.5,
            temperature: 25.0,
            humidity: 70,
            rainfall: 150,
            irrigation: Irrigation::Yes,
        }
    }
}

impl UserProfile {
    /// Pull every field into its allowed range, the way a slider would
    pub fn clamped(&self) -> Self {
        Self {
            n: self.n.clamp(NITROGEN_RANGE.0, NITROGEN_RANGE.1),
            p: self.p.clamp(PHOSPHORUS_RANGE.0, PHOSPHORUS_RANGE.1),
            k: self.k.clamp(POTASSIUM_RANGE.0, POTASSIUM_RANGE.1),
            ph: clamp_f64(self.ph, PH_RANGE),
            temperature: clamp_f64(self.temperature, TEMPERATURE_RANGE),
            humidity: self.humidity.clamp(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1),
            rainfall: self.rainfall.clamp(RAINFALL_RANGE.0, RAINFALL_RANGE.1),
            irrigation: self.irrigation,
        }
    }
}

// NaN has no nearest bound; treat it as the lower one.
fn clamp_f64(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// A submitted profile form
///
/// Every widget has a default, so fields left out of a submission fall back
/// to the [`UserProfile::default`] values and a form always yields a complete
/// profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileForm {
    pub n: Option<u32>,
    pub p: Option<u32>,
    pub k: Option<u32>,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<u32>,
    pub rainfall: Option<u32>,
    pub irrigation: Option<Irrigation>,
}

impl ProfileForm {
    pub fn into_profile(self) -> UserProfile {
        let defaults = UserProfile::default();
        UserProfile {
            n: self.n.unwrap_or(defaults.n),
            p: self.p.unwrap_or(defaults.p),
            k: self.k.unwrap_or(defaults.k),
            ph: self.ph.unwrap_or(defaults.ph),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            humidity: self.humidity.unwrap_or(defaults.humidity),
            rainfall: self.rainfall.unwrap_or(defaults.rainfall),
            irrigation: self.irrigation.unwrap_or(defaults.irrigation),
        }
    }
}

impl From<UserProfile> for ProfileForm {
    fn from(profile: UserProfile) -> Self {
        Self {
            n: Some(profile.n),
            p: Some(profile.p),
            k: Some(profile.k),
            ph: Some(profile.ph),
            temperature: Some(profile.temperature),
            humidity: Some(profile.humidity),
            rainfall: Some(profile.rainfall),
            irrigation: Some(profile.irrigation),
        }
    }
}

/// Widget descriptors for the profile form, soil fields first
pub fn profile_field_specs() -> Vec<FieldSpec> {
    let defaults = UserProfile::default();

    vec![
        int_field("n", "Nitrogen (N) - mg/kg", FieldSection::Soil, WidgetKind::Slider, NITROGEN_RANGE, defaults.n),
        int_field("p", "Phosphorus (P) - mg/kg", FieldSection::Soil, WidgetKind::Slider, PHOSPHORUS_RANGE, defaults.p),
        int_field("k", "Potassium (K) - mg/kg", FieldSection::Soil, WidgetKind::Slider, POTASSIUM_RANGE, defaults.k),
        FieldSpec {
            key: "ph".to_string(),
            label: "Soil pH Level".to_string(),
            section: FieldSection::Soil,
            widget: WidgetKind::Number,
            min: Some(PH_RANGE.0),
            max: Some(PH_RANGE.1),
            step: Some(0.1),
            default: FieldDefault::Number(defaults.ph),
            options: Vec::new(),
        },
        FieldSpec {
            key: "temperature".to_string(),
            label: "Avg Season Temp (°C)".to_string(),
            section: FieldSection::Climate,
            widget: WidgetKind::Number,
            min: Some(TEMPERATURE_RANGE.0),
            max: Some(TEMPERATURE_RANGE.1),
            step: None,
            default: FieldDefault::Number(defaults.temperature),
            options: Vec::new(),
        },
        int_field("humidity", "Avg Humidity (%)", FieldSection::Climate, WidgetKind::Slider, HUMIDITY_RANGE, defaults.humidity),
        int_field("rainfall", "Expected Rainfall (mm)", FieldSection::Climate, WidgetKind::Number, RAINFALL_RANGE, defaults.rainfall),
        FieldSpec {
            key: "irrigation".to_string(),
            label: "Irrigation Availability".to_string(),
            section: FieldSection::Climate,
            widget: WidgetKind::Radio,
            min: None,
            max: None,
            step: None,
            default: FieldDefault::Choice(defaults.irrigation.to_string()),
            options: vec![Irrigation::Yes.to_string(), Irrigation::No.to_string()],
        },
    ]
}

fn int_field(
    key: &str,
    label: &str,
    section: FieldSection,
    widget: WidgetKind,
    (min, max): (u32, u32),
    default: u32,
) -> FieldSpec {
    FieldSpec {
        key: key.to_string(),
        label: label.to_string(),
        section,
        widget,
        min: Some(f64::from(min)),
        max: Some(f64::from(max)),
        step: Some(1.0),
        default: FieldDefault::Number(f64::from(default)),
        options: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        assert!(UserProfile::default().validate().is_ok());
    }

    #[test]
    fn test_empty_form_yields_defaults() {
        let profile = ProfileForm::default().into_profile();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_partial_form_keeps_submitted_fields() {
        let form = ProfileForm {
            n: Some(90),
            irrigation: Some(Irrigation::No),
            ..Default::default()
        };
        let profile = form.into_profile();
        assert_eq!(profile.n, 90);
        assert_eq!(profile.irrigation, Irrigation::No);
        assert_eq!(profile.k, 50);
        assert_eq!(profile.rainfall, 150);
    }

    #[test]
    fn test_partial_form_from_json() {
        let form: ProfileForm = serde_json::from_str(r#"{"n": 20, "ph": 7.2}"#).unwrap();
        let profile = form.into_profile();
        assert_eq!(profile.n, 20);
        assert!((profile.ph - 7.2).abs() < f64::EPSILON);
        assert!((profile.temperature - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamped_pulls_values_into_range() {
        let profile = UserProfile {
            n: 300,
            p: 0,
            k: 999,
            ph: 20.0,
            temperature: -5.0,
            humidity: 0,
            rainfall: 1000,
            irrigation: Irrigation::No,
        };
        let clamped = profile.clamped();
        assert_eq!(clamped.n, 140);
        assert_eq!(clamped.p, 5);
        assert_eq!(clamped.k, 205);
        assert_eq!(clamped.ph, 14.0);
        assert_eq!(clamped.temperature, 10.0);
        assert_eq!(clamped.humidity, 10);
        assert_eq!(clamped.rainfall, 500);
        assert!(clamped.validate().is_ok());
    }

    #[test]
    fn test_clamped_nan_goes_to_lower_bound() {
        let profile = UserProfile {
            ph: f64::NAN,
            ..Default::default()
        };
        assert_eq!(profile.clamped().ph, 0.0);
    }

    #[test]
    fn test_validator_ranges_match_constants() {
        let at_bounds = UserProfile {
            n: NITROGEN_RANGE.1,
            p: PHOSPHORUS_RANGE.0,
            k: POTASSIUM_RANGE.1,
            ph: PH_RANGE.1,
            temperature: TEMPERATURE_RANGE.0,
            humidity: HUMIDITY_RANGE.1,
            rainfall: RAINFALL_RANGE.1,
            irrigation: Irrigation::Yes,
        };
        assert!(at_bounds.validate().is_ok());

        let over = UserProfile {
            n: NITROGEN_RANGE.1 + 1,
            ..at_bounds
        };
        assert!(over.validate().is_err());

        let under = UserProfile {
            p: PHOSPHORUS_RANGE.0 - 1,
            ..at_bounds
        };
        assert!(under.validate().is_err());
    }

    #[test]
    fn test_field_specs_cover_every_field() {
        let specs = profile_field_specs();
        let keys: Vec<&str> = specs.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["n", "p", "k", "ph", "temperature", "humidity", "rainfall", "irrigation"]
        );
        assert_eq!(specs.iter().filter(|s| s.section == FieldSection::Soil).count(), 4);

        let irrigation = specs.last().unwrap();
        assert_eq!(irrigation.options, vec!["Yes", "No"]);
        assert_eq!(irrigation.default, FieldDefault::Choice("Yes".to_string()));
    }
}

//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Whether the farm has irrigation available
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Irrigation {
    #[default]
    Yes,
    No,
}

impl std::fmt::Display for Irrigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Irrigation::Yes => write!(f, "Yes"),
            Irrigation::No => write!(f, "No"),
        }
    }
}

/// Which half of the input form a field belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldSection {
    /// Values from a soil lab report
    Soil,
    /// Seasonal forecast values
    Climate,
}

impl FieldSection {
    pub fn title(&self) -> &'static str {
        match self {
            FieldSection::Soil => "Soil Conditions",
            FieldSection::Climate => "Climatic Factors",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            FieldSection::Soil => "Input values from your recent soil lab report.",
            FieldSection::Climate => "Seasonal forecast data.",
        }
    }
}

/// Input widget used for a form field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Slider,
    Number,
    Radio,
}

/// Descriptor for one input widget on the profile form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    /// Key of the field in a submitted profile
    pub key: String,
    pub label: String,
    pub section: FieldSection,
    pub widget: WidgetKind,
    /// Lower bound (absent for radio fields)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    pub default: FieldDefault,
    /// Choices for radio fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Default value shown by a form widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldDefault {
    Number(f64),
    Choice(String),
}

//! Resource recommendation models

use serde::{Deserialize, Serialize};

/// Resource category a recommendation addresses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Soil,
    Water,
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceCategory::Soil => write!(f, "soil"),
            ResourceCategory::Water => write!(f, "water"),
        }
    }
}

/// A static suggested resource for a crop
///
/// Confidence and lift are illustrative labels, not computed from data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRule {
    pub item: String,
    pub category: ResourceCategory,
    /// Confidence label, e.g. "92%"
    pub confidence: String,
    pub lift: f64,
    pub description: String,
}

impl RecommendationRule {
    /// Lift as shown on a metric card, e.g. "3.4x"
    pub fn lift_label(&self) -> String {
        format!("{}x", self.lift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_label() {
        let rule = RecommendationRule {
            item: "Drip Irrigation".to_string(),
            category: ResourceCategory::Water,
            confidence: "81%".to_string(),
            lift: 2.5,
            description: String::new(),
        };
        assert_eq!(rule.lift_label(), "2.5x");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&ResourceCategory::Soil).unwrap();
        assert_eq!(json, "\"soil\"");
    }
}

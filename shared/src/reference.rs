//! Static reference tables
//!
//! Cluster profiles and per-crop recommendation rules. The tables are built
//! once and never mutated; a lookup miss means state and reference data have
//! drifted apart, which callers treat as a configuration error.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;

use crate::models::{ClusterId, ClusterProfile, RecommendationRule, ResourceCategory};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("no cluster profile for id {0}")]
    UnknownCluster(u8),
    #[error("no recommendation rules for crop {0:?}")]
    UnknownCrop(String),
}

/// Immutable lookup tables for clusters and recommendations
#[derive(Debug, Clone)]
pub struct ReferenceData {
    clusters: BTreeMap<ClusterId, ClusterProfile>,
    rules: HashMap<String, Vec<RecommendationRule>>,
}

/// A cluster together with the rules for its crop
#[derive(Debug, Clone, Serialize)]
pub struct ResourcePlan<'a> {
    pub cluster: &'a ClusterProfile,
    pub rules: &'a [RecommendationRule],
}

impl ReferenceData {
    /// The built-in cluster and recommendation tables
    pub fn builtin() -> Self {
        let clusters = [
            cluster(ClusterId(0), "Tropical / High Nitrogen Zone", "Rice", (90, 40, 40), "92%"),
            cluster(ClusterId(1), "Arid / Sandy Soil Zone", "Chickpea", (20, 60, 20), "88%"),
            cluster(ClusterId(2), "Temperate / Loam Zone", "Maize", (70, 50, 50), "95%"),
        ]
        .into_iter()
        .map(|profile| (profile.id, profile))
        .collect();

        let rules = [
            (
                "Rice",
                vec![
                    rule(
                        "Urea Fertilizer (High N)",
                        ResourceCategory::Soil,
                        "92%",
                        3.4,
                        "Essential for leafy growth in wet conditions.",
                    ),
                    rule(
                        "Flooding Irrigation (Weekly)",
                        ResourceCategory::Water,
                        "88%",
                        2.1,
                        "Maintains anaerobic soil conditions.",
                    ),
                ],
            ),
            (
                "Maize",
                vec![
                    rule(
                        "DAP Fertilizer (NP Mix)",
                        ResourceCategory::Soil,
                        "85%",
                        2.8,
                        "Crucial for root development and stalk strength.",
                    ),
                    rule(
                        "Sprinkler Irrigation",
                        ResourceCategory::Water,
                        "79%",
                        1.9,
                        "Ensures even coverage during tasseling.",
                    ),
                ],
            ),
            (
                "Chickpea",
                vec![
                    rule(
                        "Bio-Compost Application",
                        ResourceCategory::Soil,
                        "95%",
                        4.1,
                        "Improves soil structure in sandy textures.",
                    ),
                    rule(
                        "Drip Irrigation",
                        ResourceCategory::Water,
                        "81%",
                        2.5,
                        "Prevents root rot by delivering water directly.",
                    ),
                ],
            ),
        ]
        .into_iter()
        .map(|(crop, rules)| (crop.to_string(), rules))
        .collect();

        Self { clusters, rules }
    }

    pub fn cluster_profile(&self, id: ClusterId) -> Result<&ClusterProfile, ReferenceError> {
        self.clusters
            .get(&id)
            .ok_or(ReferenceError::UnknownCluster(id.0))
    }

    /// Rules for a crop, in presentation order
    pub fn rules_for_crop(&self, crop: &str) -> Result<&[RecommendationRule], ReferenceError> {
        self.rules
            .get(crop)
            .map(Vec::as_slice)
            .ok_or_else(|| ReferenceError::UnknownCrop(crop.to_string()))
    }

    pub fn plan_for_cluster(&self, id: ClusterId) -> Result<ResourcePlan<'_>, ReferenceError> {
        let cluster = self.cluster_profile(id)?;
        let rules = self.rules_for_crop(&cluster.crop)?;
        Ok(ResourcePlan { cluster, rules })
    }

    /// All cluster profiles in id order
    pub fn clusters(&self) -> impl Iterator<Item = &ClusterProfile> {
        self.clusters.values()
    }

    /// Every cluster's crop must have rules
    pub fn check_consistency(&self) -> Result<(), ReferenceError> {
        for cluster in self.clusters.values() {
            self.rules_for_crop(&cluster.crop)?;
        }
        Ok(())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

fn cluster(
    id: ClusterId,
    name: &str,
    crop: &str,
    (avg_n, avg_p, avg_k): (u32, u32, u32),
    match_score: &str,
) -> ClusterProfile {
    ClusterProfile {
        id,
        name: name.to_string(),
        crop: crop.to_string(),
        avg_n,
        avg_p,
        avg_k,
        match_score: match_score.to_string(),
    }
}

fn rule(
    item: &str,
    category: ResourceCategory,
    confidence: &str,
    lift: f64,
    description: &str,
) -> RecommendationRule {
    RecommendationRule {
        item: item.to_string(),
        category,
        confidence: confidence.to_string(),
        lift,
        description: description.to_string(),
    }
}

//! Soil/climate cluster models and the placeholder classifier

use serde::{Deserialize, Serialize};

use super::profile::UserProfile;

/// Nitrogen above this selects the high-nitrogen cluster
pub const HIGH_NITROGEN_THRESHOLD: u32 = 80;
/// Nitrogen below this selects the sandy-soil cluster
pub const LOW_NITROGEN_THRESHOLD: u32 = 40;

/// Identifier of a soil/climate cluster
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ClusterId(pub u8);

impl ClusterId {
    pub const HIGH_NITROGEN: ClusterId = ClusterId(0);
    pub const SANDY_SOIL: ClusterId = ClusterId(1);
    pub const LOAM: ClusterId = ClusterId(2);

    /// One-based number shown to users ("Cluster 1" for id 0)
    pub fn display_number(&self) -> u16 {
        u16::from(self.0) + 1
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cluster {}", self.display_number())
    }
}

/// Descriptive profile of a cluster archetype
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterProfile {
    pub id: ClusterId,
    /// Zone type shown to the user
    pub name: String,
    /// Representative crop; key into the recommendation rules
    pub crop: String,
    pub avg_n: u32,
    pub avg_p: u32,
    pub avg_k: u32,
    /// Match score label, e.g. "92%"
    pub match_score: String,
}

/// Assign a profile to a cluster.
///
/// This is a placeholder decision boundary on nitrogen alone, not a learned
/// model: N > 80 is cluster 0, N < 40 is cluster 1, everything else
/// (including exactly 40 and 80) is cluster 2.
pub fn classify(profile: &UserProfile) -> ClusterId {
    classify_nitrogen(profile.n)
}

/// The nitrogen rule behind [`classify`]
pub fn classify_nitrogen(n: u32) -> ClusterId {
    if n > HIGH_NITROGEN_THRESHOLD {
        ClusterId::HIGH_NITROGEN
    } else if n < LOW_NITROGEN_THRESHOLD {
        ClusterId::SANDY_SOIL
    } else {
        ClusterId::LOAM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_examples() {
        let with_n = |n| UserProfile {
            n,
            ..Default::default()
        };
        assert_eq!(classify(&with_n(90)), ClusterId(0));
        assert_eq!(classify(&with_n(20)), ClusterId(1));
        assert_eq!(classify(&with_n(50)), ClusterId(2));
    }

    #[test]
    fn test_classify_boundaries_map_to_loam() {
        assert_eq!(classify_nitrogen(80), ClusterId::LOAM);
        assert_eq!(classify_nitrogen(40), ClusterId::LOAM);
        assert_eq!(classify_nitrogen(81), ClusterId::HIGH_NITROGEN);
        assert_eq!(classify_nitrogen(39), ClusterId::SANDY_SOIL);
    }

    #[test]
    fn test_default_profile_is_loam() {
        assert_eq!(classify(&UserProfile::default()), ClusterId::LOAM);
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(ClusterId(0).to_string(), "Cluster 1");
        assert_eq!(ClusterId(2).display_number(), 3);
    }

    proptest! {
        #[test]
        fn prop_classify_matches_thresholds(n in 0u32..=140) {
            let id = classify_nitrogen(n);
            prop_assert_eq!(id == ClusterId(0), n > 80);
            prop_assert_eq!(id == ClusterId(1), n < 40);
            prop_assert_eq!(id == ClusterId(2), (40..=80).contains(&n));
        }
    }
}

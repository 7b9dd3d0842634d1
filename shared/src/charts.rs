//! Chart specifications
//!
//! Builders turn profiles and yield samples into plain chart descriptions.
//! Drawing them is left to the rendering surface.

use serde::{Deserialize, Serialize};

use crate::models::{ClusterProfile, Granularity, UserProfile, YieldSample};

/// Radial range shared by every radar axis
pub const RADAR_RANGE: (f64, f64) = (0.0, 150.0);
/// pH is multiplied by this to share the radar range
pub const PH_AXIS_SCALE: f64 = 10.0;
/// Temperature is multiplied by this to share the radar range
pub const TEMPERATURE_AXIS_SCALE: f64 = 2.0;
/// Cluster profiles carry no pH; the cluster trace uses this fixed value
pub const CLUSTER_PH_PLACEHOLDER: f64 = 65.0;
/// Cluster profiles carry no temperature; the cluster trace uses this fixed value
pub const CLUSTER_TEMPERATURE_PLACEHOLDER: f64 = 50.0;

const CLUSTER_COLOR: &str = "#4CAF50";
const CLUSTER_FILL: &str = "rgba(76, 175, 80, 0.4)";
const FARM_COLOR: &str = "#1E88E5";
const FARM_FILL: &str = "rgba(30, 136, 229, 0.2)";

/// Whether a radar axis shows a soil or a climate value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AxisGroup {
    Soil,
    Climate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RadarAxis {
    pub label: String,
    pub group: AxisGroup,
}

/// One filled polygon on the radar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RadarTrace {
    pub name: String,
    /// One value per axis, in axis order
    pub values: Vec<f64>,
    /// `values` with the first vertex repeated, ready to draw as a closed shape
    pub polygon: Vec<f64>,
    pub line_color: String,
    pub fill_color: String,
}

impl RadarTrace {
    pub fn new(name: &str, values: Vec<f64>, line_color: &str, fill_color: &str) -> Self {
        let mut polygon = values.clone();
        if let Some(first) = values.first() {
            polygon.push(*first);
        }
        Self {
            name: name.to_string(),
            values,
            polygon,
            line_color: line_color.to_string(),
            fill_color: fill_color.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RadarChart {
    pub axes: Vec<RadarAxis>,
    pub range: (f64, f64),
    pub traces: Vec<RadarTrace>,
}

/// Overlay a farm profile on its cluster's averages.
///
/// Axes are Nitrogen, Phosphorus, Potassium, pH×10 and Temp×2 so that all
/// five share [`RADAR_RANGE`].
pub fn radar_comparison(cluster: &ClusterProfile, profile: &UserProfile) -> RadarChart {
    let axes = [
        ("Nitrogen", AxisGroup::Soil),
        ("Phosphorus", AxisGroup::Soil),
        ("Potassium", AxisGroup::Soil),
        ("pH", AxisGroup::Soil),
        ("Temp", AxisGroup::Climate),
    ]
    .into_iter()
    .map(|(label, group)| RadarAxis {
        label: label.to_string(),
        group,
    })
    .collect();

    let cluster_trace = RadarTrace::new(
        "Ideal Cluster Average",
        vec![
            f64::from(cluster.avg_n),
            f64::from(cluster.avg_p),
            f64::from(cluster.avg_k),
            CLUSTER_PH_PLACEHOLDER,
            CLUSTER_TEMPERATURE_PLACEHOLDER,
        ],
        CLUSTER_COLOR,
        CLUSTER_FILL,
    );

    let farm_trace = RadarTrace::new(
        "Your Farm Profile",
        vec![
            f64::from(profile.n),
            f64::from(profile.p),
            f64::from(profile.k),
            profile.ph * PH_AXIS_SCALE,
            profile.temperature * TEMPERATURE_AXIS_SCALE,
        ],
        FARM_COLOR,
        FARM_FILL,
    );

    RadarChart {
        axes,
        range: RADAR_RANGE,
        traces: vec![cluster_trace, farm_trace],
    }
}

/// How a time series is drawn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Connected lines with markers
    Lines,
    /// Bars grouped per period
    GroupedBars,
}

impl From<Granularity> for SeriesKind {
    fn from(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Monthly => SeriesKind::Lines,
            Granularity::Quarterly | Granularity::Annual => SeriesKind::GroupedBars,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<u32>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesChart {
    pub kind: SeriesKind,
    /// Period labels, chronological
    pub periods: Vec<String>,
    pub y_title: String,
    pub series: Vec<Series>,
}

/// Forecast and actual yields aligned on their periods
pub fn time_series_comparison(granularity: Granularity, samples: &[YieldSample]) -> TimeSeriesChart {
    TimeSeriesChart {
        kind: SeriesKind::from(granularity),
        periods: samples.iter().map(|s| s.period.clone()).collect(),
        y_title: "Yield (kg)".to_string(),
        series: vec![
            Series {
                name: "Forecast".to_string(),
                values: samples.iter().map(|s| s.forecast_kg).collect(),
                color: CLUSTER_COLOR.to_string(),
            },
            Series {
                name: "Actual".to_string(),
                values: samples.iter().map(|s| s.actual_kg).collect(),
                color: FARM_COLOR.to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;
    use crate::models::ClusterId;

    fn rice() -> ClusterProfile {
        ReferenceData::builtin()
            .cluster_profile(ClusterId(0))
            .unwrap()
            .clone()
    }

    #[test]
    fn test_radar_scales_ph_and_temperature() {
        let profile = UserProfile {
            ph: 6.5,
            temperature: 25.0,
            ..Default::default()
        };
        let chart = radar_comparison(&rice(), &profile);
        let farm = &chart.traces[1];
        assert_eq!(farm.name, "Your Farm Profile");
        assert_eq!(farm.values[3], 65.0);
        assert_eq!(farm.values[4], 50.0);
    }

    #[test]
    fn test_radar_cluster_trace_uses_placeholders() {
        let chart = radar_comparison(&rice(), &UserProfile::default());
        let cluster = &chart.traces[0];
        assert_eq!(cluster.values, vec![90.0, 40.0, 40.0, 65.0, 50.0]);
    }

    #[test]
    fn test_radar_axes() {
        let chart = radar_comparison(&rice(), &UserProfile::default());
        let labels: Vec<&str> = chart.axes.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Nitrogen", "Phosphorus", "Potassium", "pH", "Temp"]);
        assert_eq!(chart.axes[4].group, AxisGroup::Climate);
        assert_eq!(chart.range, (0.0, 150.0));
        assert!(chart.traces.iter().all(|t| t.values.len() == chart.axes.len()));
    }

    #[test]
    fn test_serialized_traces_are_closed() {
        let chart = radar_comparison(&rice(), &UserProfile::default());
        let json = serde_json::to_value(&chart).unwrap();
        for trace in json["traces"].as_array().unwrap() {
            let polygon = trace["polygon"].as_array().unwrap();
            assert_eq!(polygon.len(), 6);
            assert_eq!(polygon.first(), polygon.last());
        }
    }

    fn samples() -> Vec<YieldSample> {
        vec![
            YieldSample {
                period: "Q1 2023".to_string(),
                forecast_kg: 300,
                actual_kg: 290,
            },
            YieldSample {
                period: "Q2 2023".to_string(),
                forecast_kg: 260,
                actual_kg: 320,
            },
        ]
    }

    #[test]
    fn test_time_series_alignment() {
        let chart = time_series_comparison(Granularity::Quarterly, &samples());
        assert_eq!(chart.kind, SeriesKind::GroupedBars);
        assert_eq!(chart.periods, vec!["Q1 2023", "Q2 2023"]);
        assert_eq!(chart.series[0].name, "Forecast");
        assert_eq!(chart.series[0].values, vec![300, 260]);
        assert_eq!(chart.series[1].name, "Actual");
        assert_eq!(chart.series[1].values, vec![290, 320]);
    }

    #[test]
    fn test_series_kind_per_granularity() {
        assert_eq!(SeriesKind::from(Granularity::Monthly), SeriesKind::Lines);
        assert_eq!(SeriesKind::from(Granularity::Quarterly), SeriesKind::GroupedBars);
        assert_eq!(SeriesKind::from(Granularity::Annual), SeriesKind::GroupedBars);
    }
}

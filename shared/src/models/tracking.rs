//! Forecast vs actual yield tracking
//!
//! Samples are synthetic: every call draws fresh values from the supplied
//! random source, so two renders of the same view never agree.

use std::ops::Range;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Time bucketing for the tracking view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Monthly,
    Quarterly,
    Annual,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [
        Granularity::Monthly,
        Granularity::Quarterly,
        Granularity::Annual,
    ];

    /// Sample count, value ranges and reference period for this granularity
    pub fn series_spec(&self) -> SeriesSpec {
        match self {
            Granularity::Monthly => SeriesSpec {
                count: 12,
                start_year: 2024,
                forecast_kg: 80..120,
                actual_kg: 70..110,
            },
            Granularity::Quarterly => SeriesSpec {
                count: 4,
                start_year: 2023,
                forecast_kg: 250..350,
                actual_kg: 240..340,
            },
            Granularity::Annual => SeriesSpec {
                count: 5,
                start_year: 2020,
                forecast_kg: 1000..1400,
                actual_kg: 950..1350,
            },
        }
    }

    /// Tab title
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Monthly => "Monthly",
            Granularity::Quarterly => "Quarterly",
            Granularity::Annual => "Annual",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(Granularity::Monthly),
            "quarterly" => Ok(Granularity::Quarterly),
            "annual" => Ok(Granularity::Annual),
            other => Err(format!("Unknown granularity: {}", other)),
        }
    }
}

/// Shape of a generated series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSpec {
    pub count: u32,
    /// First year of the reference period
    pub start_year: i32,
    /// Half-open forecast range in kg
    pub forecast_kg: Range<u32>,
    /// Half-open actual range in kg
    pub actual_kg: Range<u32>,
}

/// One period of forecast vs actual yield
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YieldSample {
    /// Period label: "2024-01", "Q1 2023" or "2020"
    pub period: String,
    pub forecast_kg: u32,
    pub actual_kg: u32,
}

/// Generate a chronological series of yield samples
pub fn tracking_series<R: Rng + ?Sized>(granularity: Granularity, rng: &mut R) -> Vec<YieldSample> {
    let spec = granularity.series_spec();

    let forecasts: Vec<u32> = (0..spec.count)
        .map(|_| rng.gen_range(spec.forecast_kg.clone()))
        .collect();
    let actuals: Vec<u32> = (0..spec.count)
        .map(|_| rng.gen_range(spec.actual_kg.clone()))
        .collect();

    period_labels(granularity)
        .into_iter()
        .zip(forecasts.into_iter().zip(actuals))
        .map(|(period, (forecast_kg, actual_kg))| YieldSample {
            period,
            forecast_kg,
            actual_kg,
        })
        .collect()
}

/// Chronological period labels for a granularity
pub fn period_labels(granularity: Granularity) -> Vec<String> {
    let spec = granularity.series_spec();

    match granularity {
        Granularity::Monthly => (1..=spec.count)
            .map(|month| {
                NaiveDate::from_ymd_opt(spec.start_year, month, 1)
                    .map(|date| date.format("%Y-%m").to_string())
                    .unwrap_or_else(|| format!("{}-{:02}", spec.start_year, month))
            })
            .collect(),
        Granularity::Quarterly => (1..=spec.count)
            .map(|quarter| {
                // Quarters are labelled from their closing month
                NaiveDate::from_ymd_opt(spec.start_year, quarter * 3, 1)
                    .map(|date| format!("Q{} {}", date.month0() / 3 + 1, date.year()))
                    .unwrap_or_else(|| format!("Q{} {}", quarter, spec.start_year))
            })
            .collect(),
        Granularity::Annual => (0..spec.count as i32)
            .map(|offset| {
                let year = spec.start_year + offset;
                NaiveDate::from_ymd_opt(year, 12, 31)
                    .map(|date| date.format("%Y").to_string())
                    .unwrap_or_else(|| year.to_string())
            })
            .collect(),
    }
}

/// Totals over a tracked series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingSummary {
    pub total_forecast_kg: u64,
    pub total_actual_kg: u64,
    /// Signed deviation of actual from forecast, percent of forecast
    pub deviation_percent: f64,
}

impl TrackingSummary {
    pub fn from_samples(samples: &[YieldSample]) -> Self {
        let total_forecast_kg: u64 = samples.iter().map(|s| u64::from(s.forecast_kg)).sum();
        let total_actual_kg: u64 = samples.iter().map(|s| u64::from(s.actual_kg)).sum();

        let deviation_percent = if total_forecast_kg == 0 {
            0.0
        } else {
            (total_actual_kg as f64 - total_forecast_kg as f64) / total_forecast_kg as f64 * 100.0
        };

        Self {
            total_forecast_kg,
            total_actual_kg,
            deviation_percent,
        }
    }
}

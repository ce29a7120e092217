//! The result bundle handed to presentation layers.
//!
//! Field names are the JSON contract. Every float is already rounded when it
//! lands here (2 dp for KPI/summary figures, 6 dp for series), so two runs
//! over the same files serialize byte-identically.

use serde::{Deserialize, Serialize};

use crate::domain::DatasetMeta;

/// Full output of one analysis run.
///
/// When `ok` is false, `error` explains why and `analytics` is absent; the
/// diagnostics and dataset metadata are always filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub country: String,
    pub diagnostics: Diagnostics,
    pub meta: BundleMeta,
    #[serde(flatten)]
    pub analytics: Option<Analytics>,
}

/// What was requested vs. what was used, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub expected_country: String,
    pub used_country: String,
    /// Raw data rows in each input file.
    pub gdp_rows: usize,
    pub infl_rows: usize,
    pub gdp_schema: SchemaFacts,
    pub infl_schema: SchemaFacts,
}

/// Detector and extractor decisions for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaFacts {
    /// `wide`, `long` or `unknown`.
    pub kind: String,
    pub entity_column: Option<String>,
    /// True when the entity column was synthesized because the file had none.
    pub entity_synthesized: bool,
    pub year_columns: Vec<String>,
    pub time_column: Option<String>,
    pub value_column: Option<String>,
    pub used_entity: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMeta {
    pub datasets: DatasetsMeta,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetsMeta {
    pub gdp: DatasetMeta,
    pub inflation: DatasetMeta,
}

/// Year span with a present value, per input and for the aligned pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub gdp: YearSpan,
    pub inflation: YearSpan,
    pub both: YearSpan,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl YearSpan {
    pub fn from_range(range: Option<(i32, i32)>) -> Self {
        match range {
            Some((min, max)) => Self {
                min: Some(min),
                max: Some(max),
            },
            None => Self::default(),
        }
    }
}

/// Everything the derivation engine computes from an aligned pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub kpi: Kpi,
    pub series: AlignedSeries,
    pub yoy: YearOverYear,
    pub rolling: Rolling,
    pub decades: Decades,
    pub regression: Regression,
    pub extra: Extra,
    pub periods: PeriodSplit,
    pub extremes: Extremes,
    pub performance: Vec<YearPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub records: usize,
    pub unique_years: usize,
    pub inflation_mean: f64,
    pub inflation_std: f64,
    pub inflation_min: f64,
    pub inflation_max: f64,
    pub gdp_mean: f64,
    pub gdp_std: f64,
    pub gdp_min: f64,
    pub gdp_max: f64,
    /// `None` when undefined (fewer than 2 points or a constant series).
    pub corr_gdp_inflation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub years: Vec<i32>,
    pub gdp: Vec<f64>,
    pub inflation: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    pub years: Vec<i32>,
    pub gdp: Vec<f64>,
    pub inflation: Vec<f64>,
    pub summary: DeltaSummary,
}

/// Sign tally of the GDP deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaSummary {
    pub positive: usize,
    pub negative: usize,
    pub zero: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rolling {
    pub window: usize,
    /// Year at the end of each full window.
    pub years: Vec<i32>,
    pub gdp_ma: Vec<f64>,
    pub infl_ma: Vec<f64>,
    pub gdp_std: Vec<f64>,
    pub infl_std: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decades {
    pub labels: Vec<String>,
    pub gdp_mean: Vec<f64>,
    pub infl_mean: Vec<f64>,
}

/// `gdp = slope * inflation + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    /// Running sum of GDP deltas; starts at 0 for the first year.
    pub cum_gdp: Vec<f64>,
    pub infl_hist_centers: Vec<f64>,
    pub infl_hist_counts: Vec<usize>,
}

/// Means and spreads either side of a pivot year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSplit {
    pub pivot: i32,
    pub before: PeriodStats,
    pub after: PeriodStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub years: usize,
    pub gdp_mean: f64,
    pub gdp_std: f64,
    pub infl_mean: f64,
    pub infl_std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    pub best_gdp: YearValue,
    pub worst_gdp: YearValue,
    pub best_infl: YearValue,
    pub worst_infl: YearValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Per-year labels for the performance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPerformance {
    pub year: i32,
    pub growth: GrowthCategory,
    pub inflation: InflationCategory,
    pub era: Era,
}

/// Band of the year-over-year GDP change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthCategory {
    /// Change above 3.
    #[serde(rename = "High Growth")]
    High,
    /// Change in `[0, 3]`.
    #[serde(rename = "Moderate Growth")]
    Moderate,
    #[serde(rename = "Recession/Decline")]
    Decline,
    /// First aligned year: no previous year to compare with.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl GrowthCategory {
    pub fn classify(change: Option<f64>) -> Self {
        match change {
            None => GrowthCategory::Unknown,
            Some(v) if v > 3.0 => GrowthCategory::High,
            Some(v) if v >= 0.0 => GrowthCategory::Moderate,
            Some(_) => GrowthCategory::Decline,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GrowthCategory::High => "High Growth",
            GrowthCategory::Moderate => "Moderate Growth",
            GrowthCategory::Decline => "Recession/Decline",
            GrowthCategory::Unknown => "Unknown",
        }
    }
}

/// Band of the inflation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InflationCategory {
    /// Below 3.
    #[serde(rename = "Low Inflation")]
    Low,
    /// In `[3, 6]`.
    #[serde(rename = "Target Range")]
    Target,
    #[serde(rename = "High Inflation")]
    High,
}

impl InflationCategory {
    pub fn classify(rate: f64) -> Self {
        if rate < 3.0 {
            InflationCategory::Low
        } else if rate <= 6.0 {
            InflationCategory::Target
        } else {
            InflationCategory::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InflationCategory::Low => "Low Inflation",
            InflationCategory::Target => "Target Range",
            InflationCategory::High => "High Inflation",
        }
    }
}

/// Side of the period pivot a year falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Before,
    After,
}

impl Era {
    pub fn for_year(year: i32, pivot: i32) -> Self {
        if year >= pivot { Era::After } else { Era::Before }
    }
}

//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - passed between the loader, detector, extractor and aligner
//! - exported as part of the JSON result bundle
//! - reloaded later for plotting

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Entity assumed when a table carries no entity column.
pub const DEFAULT_COUNTRY: &str = "South Africa";

/// Fixed dataset selector accepted by the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKey {
    Gdp,
    Inflation,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 2] = [DatasetKey::Gdp, DatasetKey::Inflation];

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKey::Gdp => "gdp",
            DatasetKey::Inflation => "inflation",
        }
    }

    /// Human-readable title for listings.
    pub fn title(self, country: &str) -> String {
        match self {
            DatasetKey::Gdp => format!("GDP ({country})"),
            DatasetKey::Inflation => format!("Inflation ({country})"),
        }
    }
}

impl FromStr for DatasetKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gdp" => Ok(DatasetKey::Gdp),
            "inflation" => Ok(DatasetKey::Inflation),
            other => Err(AppError::unknown_target(format!(
                "Unknown dataset '{other}': expected 'gdp' or 'inflation'."
            ))),
        }
    }
}

/// A header recognised as a calendar year (`1990`, `Y1990`, `y2001`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearColumn {
    pub name: String,
    pub year: i32,
    /// Position in the header row. Headers may repeat, so extraction reads by index.
    pub index: usize,
}

/// Table orientation, decided once by the detector.
///
/// Each variant carries exactly what its extraction strategy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    /// One row per entity, one column per year. Year columns are sorted by year.
    Wide { year_columns: Vec<YearColumn> },
    /// One row per observation with explicit time and value columns.
    Long {
        time_column: String,
        value_column: String,
    },
    Unknown,
}

impl SchemaKind {
    pub fn label(&self) -> &'static str {
        match self {
            SchemaKind::Wide { .. } => "wide",
            SchemaKind::Long { .. } => "long",
            SchemaKind::Unknown => "unknown",
        }
    }
}

/// Detector output: orientation plus the canonical entity column, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedSchema {
    pub kind: SchemaKind,
    pub entity_column: Option<String>,
}

/// One observation. `value` is `None` for blank or unparsable cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Option<f64>,
}

/// Ordered `(year, value)` pairs, strictly increasing by year.
///
/// Absent values are kept until alignment so metadata can count them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Build from points in any order. Later duplicates of a year overwrite earlier ones.
    pub fn from_points(points: impl IntoIterator<Item = SeriesPoint>) -> Self {
        let mut by_year = std::collections::BTreeMap::new();
        for p in points {
            by_year.insert(p.year, p.value);
        }
        Self {
            points: by_year
                .into_iter()
                .map(|(year, value)| SeriesPoint { year, value })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Points that carry a value.
    pub fn present(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points.iter().filter_map(|p| p.value.map(|v| (p.year, v)))
    }

    pub fn non_null_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    pub fn null_count(&self) -> usize {
        self.points.len() - self.non_null_count()
    }

    /// `(min, max)` year among points that carry a value.
    pub fn present_year_range(&self) -> Option<(i32, i32)> {
        let mut it = self.present().map(|(y, _)| y);
        let first = it.next()?;
        let last = it.last().unwrap_or(first);
        Some((first, last))
    }
}

/// GDP and inflation reduced to the years where both have a value.
///
/// Invariant: `years.len() == gdp.len() == inflation.len()`, years ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedPair {
    pub years: Vec<i32>,
    pub gdp: Vec<f64>,
    pub inflation: Vec<f64>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Descriptive facts about one dataset after extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub name: String,
    pub entity_column: Option<String>,
    /// Non-null point count of the extracted series, not the raw row count.
    pub row_count: usize,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub non_null_points: usize,
    pub null_points: usize,
    pub columns_preview: Vec<String>,
}

impl DatasetMeta {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Resolved settings for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory holding both CSV files. Falls back to `ECON_DATASETS` when unset.
    pub data_dir: Option<PathBuf>,
    pub gdp_file: String,
    pub inflation_file: String,
    /// Entity requested by the caller.
    pub country: String,
    /// Entity synthesized for tables without an entity column.
    pub default_country: String,
    /// First year of the "after" side of the period split.
    pub period_pivot: i32,
    pub export_json: Option<PathBuf>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub debug_bundle: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            gdp_file: "GDP.csv".to_string(),
            inflation_file: "Inflation1.csv".to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            default_country: DEFAULT_COUNTRY.to_string(),
            period_pivot: 1994,
            export_json: None,
            plot: false,
            plot_width: 72,
            plot_height: 16,
            debug_bundle: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_key_parses_case_insensitively() {
        assert_eq!("GDP".parse::<DatasetKey>().unwrap(), DatasetKey::Gdp);
        assert_eq!(" inflation ".parse::<DatasetKey>().unwrap(), DatasetKey::Inflation);
    }

    #[test]
    fn dataset_key_rejects_unknown_selector() {
        let err = "cpi".parse::<DatasetKey>().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UnknownTarget);
        assert!(err.message().contains("cpi"));
    }

    #[test]
    fn series_from_points_sorts_and_overwrites() {
        let s = Series::from_points([
            SeriesPoint { year: 1992, value: Some(3.0) },
            SeriesPoint { year: 1990, value: Some(1.0) },
            SeriesPoint { year: 1992, value: None },
        ]);
        let years: Vec<i32> = s.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1990, 1992]);
        assert_eq!(s.points[1].value, None);
        assert_eq!(s.non_null_count(), 1);
        assert_eq!(s.null_count(), 1);
    }

    #[test]
    fn present_year_range_ignores_absent_points() {
        let s = Series::from_points([
            SeriesPoint { year: 1989, value: None },
            SeriesPoint { year: 1990, value: Some(1.0) },
            SeriesPoint { year: 1995, value: Some(2.0) },
            SeriesPoint { year: 1996, value: None },
        ]);
        assert_eq!(s.present_year_range(), Some((1990, 1995)));
        assert_eq!(Series::default().present_year_range(), None);
    }
}

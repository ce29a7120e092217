//! Classify a raw table as WIDE, LONG or UNKNOWN.
//!
//! Rules, in order:
//! 1. Two or more headers matching `(Y|y)?(19|20)\d{2}` make the table WIDE.
//! 2. Otherwise a time column and a value column (case-insensitive, first
//!    candidate wins) make it LONG.
//! 3. Anything else is UNKNOWN.
//!
//! The entity column is detected independently of the orientation.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::{DetectedSchema, SchemaKind, YearColumn};
use crate::io::RawTable;

static YEAR_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[Yy]?((?:19|20)\d{2})$").expect("year header pattern is valid")
});

/// Time column candidates, highest priority first. Compared lowercase.
const TIME_CANDIDATES: [&str; 4] = ["time_period", "year", "date", "period"];

/// Value column candidates, highest priority first. Compared lowercase.
const VALUE_CANDIDATES: [&str; 3] = ["obs_value", "value", "val"];

/// Substrings marking an entity column. Compared lowercase.
const ENTITY_MARKERS: [&str; 4] = ["country", "ref_area", "location", "economy"];

/// Detect the schema of `table`.
pub fn detect_schema(table: &RawTable) -> DetectedSchema {
    let columns = table.columns();
    let entity_column = detect_entity_column(columns);

    let year_columns = detect_year_columns(columns);
    let kind = if year_columns.len() >= 2 {
        SchemaKind::Wide { year_columns }
    } else {
        match (
            find_candidate(columns, &TIME_CANDIDATES),
            find_candidate(columns, &VALUE_CANDIDATES),
        ) {
            (Some(time_column), Some(value_column)) => SchemaKind::Long {
                time_column,
                value_column,
            },
            _ => SchemaKind::Unknown,
        }
    };

    debug!(kind = kind.label(), entity = ?entity_column, "detected schema");
    DetectedSchema {
        kind,
        entity_column,
    }
}

/// Headers that denote a calendar year, sorted by the year they encode.
pub fn detect_year_columns(columns: &[String]) -> Vec<YearColumn> {
    let mut out: Vec<YearColumn> = columns
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            let caps = YEAR_HEADER.captures(name.trim())?;
            let year = caps.get(1)?.as_str().parse().ok()?;
            Some(YearColumn {
                name: name.clone(),
                year,
                index,
            })
        })
        .collect();
    // Stable: equal years keep header order.
    out.sort_by_key(|c| c.year);
    out
}

/// Shortest header containing an entity marker; ties keep header order.
pub fn detect_entity_column(columns: &[String]) -> Option<String> {
    columns
        .iter()
        .filter(|name| {
            let lower = name.to_lowercase();
            ENTITY_MARKERS.iter().any(|m| lower.contains(m))
        })
        .min_by_key(|name| name.chars().count())
        .cloned()
}

fn find_candidate(columns: &[String], candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|candidate| {
        columns
            .iter()
            .find(|c| c.trim().eq_ignore_ascii_case(candidate))
            .cloned()
    })
}

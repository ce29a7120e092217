//! Pull one entity's `(year, value)` series out of a raw table.
//!
//! One strategy per `SchemaKind` variant; the variant is chosen by the
//! detector and never revisited here. Nothing in this module fails: a missing
//! entity or an unknown schema yields an empty series, and the caller decides
//! how to react.

use tracing::debug;

use crate::domain::{DatasetMeta, DetectedSchema, SchemaKind, Series, SeriesPoint, YearColumn};
use crate::io::{RawTable, parse_number};

/// Number of year labels shown in `columns_preview` for wide tables.
const PREVIEW_YEAR_LABELS: usize = 6;

/// How the target entity was located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityMatch {
    /// Rows matched on the entity column; `value` is the spelling found in the file.
    Matched { column: String, value: String },
    /// No entity column: the table is assumed to describe a single entity.
    Implicit,
    /// Nothing matched the target.
    NotFound { column: Option<String> },
    /// Schema unknown, extraction not attempted.
    Unsupported,
}

impl EntityMatch {
    pub fn reason(&self) -> String {
        match self {
            EntityMatch::Matched { column, value } => {
                format!("matched '{value}' in entity column '{column}'")
            }
            EntityMatch::Implicit => "no entity column; single implicit entity".to_string(),
            EntityMatch::NotFound { column: Some(column) } => {
                format!("no row matched in entity column '{column}'")
            }
            EntityMatch::NotFound { column: None } => "table has no data rows".to_string(),
            EntityMatch::Unsupported => {
                "schema not recognised (neither wide nor long)".to_string()
            }
        }
    }
}

/// Extracted series plus how it was found and what it looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub series: Series,
    pub meta: DatasetMeta,
    pub entity: EntityMatch,
}

/// Extract the series for `target` (trimmed, case-insensitive exact match).
pub fn extract_series(table: &RawTable, schema: &DetectedSchema, target: &str, name: &str) -> Extraction {
    let entity_idx = schema
        .entity_column
        .as_deref()
        .and_then(|c| table.column_index(c));

    let (series, entity) = match &schema.kind {
        SchemaKind::Wide { year_columns } => extract_wide(table, year_columns, schema, entity_idx, target),
        SchemaKind::Long {
            time_column,
            value_column,
        } => extract_long(table, time_column, value_column, schema, entity_idx, target),
        SchemaKind::Unknown => (Series::default(), EntityMatch::Unsupported),
    };

    let meta = build_meta(name, schema, &series);
    debug!(
        dataset = name,
        points = series.len(),
        non_null = meta.non_null_points,
        reason = %entity.reason(),
        "extracted series"
    );

    Extraction { series, meta, entity }
}

fn extract_wide(
    table: &RawTable,
    year_columns: &[YearColumn],
    schema: &DetectedSchema,
    entity_idx: Option<usize>,
    target: &str,
) -> (Series, EntityMatch) {
    let hit = match (entity_idx, schema.entity_column.as_ref()) {
        (Some(idx), Some(column)) => (0..table.row_count())
            .find_map(|row| {
                let value = table.cell(row, idx)?;
                entity_matches(value, target).then(|| {
                    (
                        row,
                        EntityMatch::Matched {
                            column: column.clone(),
                            value: value.to_string(),
                        },
                    )
                })
            }),
        _ => (table.row_count() > 0).then_some((0, EntityMatch::Implicit)),
    };

    let Some((row, entity)) = hit else {
        return (
            Series::default(),
            EntityMatch::NotFound {
                column: schema.entity_column.clone(),
            },
        );
    };

    let points = year_columns.iter().map(|yc| SeriesPoint {
        year: yc.year,
        value: table.cell(row, yc.index).and_then(parse_number),
    });

    (Series::from_points(points), entity)
}

fn extract_long(
    table: &RawTable,
    time_column: &str,
    value_column: &str,
    schema: &DetectedSchema,
    entity_idx: Option<usize>,
    target: &str,
) -> (Series, EntityMatch) {
    let (Some(time_idx), Some(value_idx)) = (table.column_index(time_column), table.column_index(value_column))
    else {
        return (Series::default(), EntityMatch::Unsupported);
    };

    let mut matched: Option<String> = None;
    let mut points = Vec::new();

    for row in 0..table.row_count() {
        if let Some(idx) = entity_idx {
            match table.cell(row, idx) {
                Some(value) if entity_matches(value, target) => {
                    matched.get_or_insert_with(|| value.to_string());
                }
                _ => continue,
            }
        }

        // Structurally invalid rows are skipped, not counted as absent.
        let Some(year) = table.cell(row, time_idx).and_then(leading_year) else {
            continue;
        };
        points.push(SeriesPoint {
            year,
            value: table.cell(row, value_idx).and_then(parse_number),
        });
    }

    let entity = match (schema.entity_column.as_ref(), matched) {
        (Some(column), Some(value)) => EntityMatch::Matched {
            column: column.clone(),
            value,
        },
        (Some(column), None) => EntityMatch::NotFound {
            column: Some(column.clone()),
        },
        (None, _) if table.row_count() == 0 => EntityMatch::NotFound { column: None },
        (None, _) => EntityMatch::Implicit,
    };

    // Duplicate years: the last row wins.
    (Series::from_points(points), entity)
}

fn entity_matches(cell: &str, target: &str) -> bool {
    cell.trim().to_lowercase() == target.trim().to_lowercase()
}

/// Year from the first four characters of a time cell (`1990`, `1990-01-01`, `1990Q1`).
fn leading_year(raw: &str) -> Option<i32> {
    let head = raw.trim().get(..4)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}

fn build_meta(name: &str, schema: &DetectedSchema, series: &Series) -> DatasetMeta {
    if series.is_empty() {
        return DatasetMeta::empty(name);
    }

    let mut columns_preview: Vec<String> = schema.entity_column.iter().cloned().collect();
    match &schema.kind {
        SchemaKind::Wide { year_columns } => {
            columns_preview.extend(year_columns.iter().take(PREVIEW_YEAR_LABELS).map(|c| c.year.to_string()));
        }
        SchemaKind::Long {
            time_column,
            value_column,
        } => {
            columns_preview.push(time_column.clone());
            columns_preview.push(value_column.clone());
        }
        SchemaKind::Unknown => {}
    }

    let non_null = series.non_null_count();
    DatasetMeta {
        name: name.to_string(),
        entity_column: schema.entity_column.clone(),
        row_count: non_null,
        year_min: series.points.first().map(|p| p.year),
        year_max: series.points.last().map(|p| p.year),
        non_null_points: non_null,
        null_points: series.null_count(),
        columns_preview,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_table;
    use crate::schema::detect_schema;

    fn run(csv: &str, target: &str) -> Extraction {
        let table = read_table(csv.as_bytes()).unwrap();
        let schema = detect_schema(&table);
        extract_series(&table, &schema, target, "test.csv")
    }

    fn values(e: &Extraction) -> Vec<(i32, Option<f64>)> {
        e.series.points.iter().map(|p| (p.year, p.value)).collect()
    }

    #[test]
    fn wide_matches_entity_case_insensitively_and_keeps_absent() {
        let e = run(
            "Country,1990,1991,1992\nKenya,9,9,9\nSOUTH AFRICA ,1.0,2.0,\n",
            "  south africa",
        );
        assert_eq!(values(&e), vec![(1990, Some(1.0)), (1991, Some(2.0)), (1992, None)]);
        assert_eq!(
            e.entity,
            EntityMatch::Matched {
                column: "Country".to_string(),
                value: "SOUTH AFRICA".to_string(),
            }
        );
        assert_eq!(e.meta.row_count, 2);
        assert_eq!(e.meta.null_points, 1);
        assert_eq!(e.meta.year_min, Some(1990));
        assert_eq!(e.meta.year_max, Some(1992));
        assert_eq!(e.meta.columns_preview, vec!["Country", "1990", "1991", "1992"]);
    }

    #[test]
    fn wide_without_entity_column_takes_first_row() {
        let e = run("Series,1990,1991\nfirst,1,2\nsecond,3,4\n", "Anywhere");
        assert_eq!(values(&e), vec![(1990, Some(1.0)), (1991, Some(2.0))]);
        assert_eq!(e.entity, EntityMatch::Implicit);
    }

    #[test]
    fn wide_repeated_year_header_reads_the_later_column() {
        let e = run("Country,1990,1991,1991\nSouth Africa,1,2,3\n", "South Africa");
        assert_eq!(values(&e), vec![(1990, Some(1.0)), (1991, Some(3.0))]);
    }

    #[test]
    fn wide_unmatched_entity_is_empty_not_error() {
        let e = run("Country,1990,1991\nKenya,1,2\n", "South Africa");
        assert!(e.series.is_empty());
        assert_eq!(e.meta, DatasetMeta::empty("test.csv"));
        assert!(matches!(e.entity, EntityMatch::NotFound { .. }));
    }

    #[test]
    fn long_parses_dates_skips_bad_years_and_last_row_wins() {
        let e = run(
            "REF_AREA,TIME_PERIOD,OBS_VALUE\n\
             ZA,1990-01-01,5.0\n\
             ZA,bad,7.0\n\
             KE,1990,99\n\
             ZA,1991,6.0\n\
             ZA,1990,5.5\n\
             ZA,1992,n/a\n",
            "za",
        );
        assert_eq!(values(&e), vec![(1990, Some(5.5)), (1991, Some(6.0)), (1992, None)]);
        assert_eq!(e.meta.non_null_points, 2);
        assert_eq!(e.meta.null_points, 1);
        assert_eq!(e.meta.columns_preview, vec!["REF_AREA", "TIME_PERIOD", "OBS_VALUE"]);
    }

    #[test]
    fn long_without_entity_column_uses_every_row() {
        let e = run("TIME_PERIOD,OBS_VALUE\n1991,6.0\n1990,5.0\n", "whatever");
        assert_eq!(values(&e), vec![(1990, Some(5.0)), (1991, Some(6.0))]);
        assert_eq!(e.entity, EntityMatch::Implicit);
    }

    #[test]
    fn unknown_schema_yields_empty_series_and_zeroed_meta() {
        let e = run("foo,bar\n1,2\n", "South Africa");
        assert!(e.series.is_empty());
        assert_eq!(e.meta.non_null_points, 0);
        assert_eq!(e.entity, EntityMatch::Unsupported);
    }

    #[test]
    fn leading_year_requires_four_digits() {
        assert_eq!(leading_year("1990-01-01"), Some(1990));
        assert_eq!(leading_year(" 2001Q3"), Some(2001));
        assert_eq!(leading_year("199"), None);
        assert_eq!(leading_year("FY90"), None);
    }
}

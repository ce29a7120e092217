//! Detect, reconcile the entity column, and extract one dataset.
//!
//! Files without an entity column are given one on a private copy of the
//! table, filled with the default entity, so both inputs go through the same
//! matching path.

use tracing::info;

use crate::domain::{DatasetKey, DetectedSchema, SchemaFacts, SchemaKind};
use crate::extract::{EntityMatch, Extraction, extract_series};
use crate::io::RawTable;
use crate::schema::detect_schema;

/// Header used for a synthesized entity column.
pub const SYNTHESIZED_ENTITY_COLUMN: &str = "Country";

/// One dataset after detection and extraction.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub key: DatasetKey,
    /// Data rows in the raw file.
    pub raw_rows: usize,
    pub schema: DetectedSchema,
    pub extraction: Extraction,
    pub facts: SchemaFacts,
}

impl PreparedDataset {
    /// Entity name actually used for this dataset.
    pub fn used_entity(&self) -> &str {
        &self.facts.used_entity
    }
}

/// Run detection and extraction for `requested`.
///
/// When the file has no entity column the extraction targets `default_entity`
/// instead, since that is the only entity the file can describe.
pub fn prepare_dataset(
    key: DatasetKey,
    table: &RawTable,
    file_name: &str,
    requested: &str,
    default_entity: &str,
) -> PreparedDataset {
    let detected = detect_schema(table);

    let synthesize = detected.entity_column.is_none() && detected.kind != SchemaKind::Unknown;
    let (schema, extraction) = if synthesize {
        let enriched = table.with_constant_column(SYNTHESIZED_ENTITY_COLUMN, default_entity);
        let schema = DetectedSchema {
            entity_column: Some(SYNTHESIZED_ENTITY_COLUMN.to_string()),
            ..detected
        };
        info!(
            dataset = key.as_str(),
            entity = default_entity,
            "no entity column found; synthesized one"
        );
        let extraction = extract_series(&enriched, &schema, default_entity, file_name);
        (schema, extraction)
    } else {
        let extraction = extract_series(table, &detected, requested, file_name);
        (detected, extraction)
    };

    let used_entity = match &extraction.entity {
        EntityMatch::Matched { value, .. } => value.clone(),
        EntityMatch::Implicit => default_entity.to_string(),
        EntityMatch::NotFound { .. } | EntityMatch::Unsupported => requested.to_string(),
    };

    let facts = schema_facts(&schema, &extraction, synthesize, used_entity);

    PreparedDataset {
        key,
        raw_rows: table.row_count(),
        schema,
        extraction,
        facts,
    }
}

fn schema_facts(
    schema: &DetectedSchema,
    extraction: &Extraction,
    synthesized: bool,
    used_entity: String,
) -> SchemaFacts {
    let (year_columns, time_column, value_column) = match &schema.kind {
        SchemaKind::Wide { year_columns } => (
            year_columns.iter().map(|c| c.name.clone()).collect(),
            None,
            None,
        ),
        SchemaKind::Long {
            time_column,
            value_column,
        } => (Vec::new(), Some(time_column.clone()), Some(value_column.clone())),
        SchemaKind::Unknown => (Vec::new(), None, None),
    };

    let mut reason = extraction.entity.reason();
    if synthesized {
        reason = format!("entity column synthesized with '{used_entity}'; {reason}");
    }

    SchemaFacts {
        kind: schema.kind.label().to_string(),
        entity_column: schema.entity_column.clone(),
        entity_synthesized: synthesized,
        year_columns,
        time_column,
        value_column,
        used_entity,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_table;

    fn prepare(csv: &str, requested: &str) -> PreparedDataset {
        let table = read_table(csv.as_bytes()).unwrap();
        prepare_dataset(DatasetKey::Gdp, &table, "GDP.csv", requested, "South Africa")
    }

    #[test]
    fn entityless_file_gets_synthesized_default_entity() {
        let p = prepare("TIME_PERIOD,OBS_VALUE\n1990,5.0\n1991,6.0\n", "South Africa");

        assert!(p.facts.entity_synthesized);
        assert_eq!(p.facts.entity_column.as_deref(), Some("Country"));
        assert_eq!(p.used_entity(), "South Africa");
        assert_eq!(p.extraction.series.non_null_count(), 2);
        assert_eq!(p.raw_rows, 2);
        assert_eq!(p.facts.time_column.as_deref(), Some("TIME_PERIOD"));
    }

    #[test]
    fn matched_entity_reports_file_spelling() {
        let p = prepare("Country Name,1990,1991\nsouth africa,1,2\n", "South Africa");

        assert!(!p.facts.entity_synthesized);
        assert_eq!(p.used_entity(), "south africa");
        assert_eq!(p.facts.kind, "wide");
        assert_eq!(p.facts.year_columns, vec!["1990", "1991"]);
        assert!(p.facts.reason.contains("Country Name"));
    }

    #[test]
    fn unmatched_entity_keeps_requested_name() {
        let p = prepare("Country,1990,1991\nKenya,1,2\n", "South Africa");
        assert_eq!(p.used_entity(), "South Africa");
        assert!(p.extraction.series.is_empty());
        assert!(p.facts.reason.contains("no row matched"));
    }

    #[test]
    fn unknown_schema_is_not_enriched() {
        let p = prepare("foo,bar\n1,2\n", "South Africa");
        assert_eq!(p.facts.kind, "unknown");
        assert!(!p.facts.entity_synthesized);
        assert!(p.extraction.series.is_empty());
    }
}

//! CSV loading into an orientation-agnostic table.
//!
//! The loader knows nothing about years, countries or values. It only turns a
//! comma-delimited file into a header list plus rows of raw strings, keeping
//! blank cells blank. Interpretation happens in `schema` and `extract`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::AppError;

/// Header + rows of raw cell text.
///
/// Every row has exactly one cell per column; short records are padded with
/// blanks and long records truncated when the table is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Trimmed cell text, or `None` when the cell is blank.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)?
            .get(column)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Copy of this table with an extra column holding `value` on every row.
    ///
    /// Used to give entity-less files an explicit entity. The original table is
    /// left untouched.
    pub fn with_constant_column(&self, name: &str, value: &str) -> RawTable {
        let mut columns = self.columns.clone();
        columns.push(name.to_string());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.push(value.to_string());
                row
            })
            .collect();
        RawTable { columns, rows }
    }
}

/// Result of trying to load one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLoad {
    Loaded(RawTable),
    /// The path does not exist. Reported, not raised, so callers can name it.
    Missing(PathBuf),
}

/// Load a comma-delimited file.
pub fn load_table(path: &Path) -> Result<TableLoad, AppError> {
    if !path.is_file() {
        warn!(path = %path.display(), "input file missing");
        return Ok(TableLoad::Missing(path.to_path_buf()));
    }

    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let table = read_table(file)
        .map_err(|e| AppError::io(format!("Failed to read CSV '{}': {e}", path.display())))?;

    debug!(
        path = %path.display(),
        columns = table.columns().len(),
        rows = table.row_count(),
        "loaded table"
    );
    Ok(TableLoad::Loaded(table))
}

/// Read a table from any CSV source.
///
/// Fields are decoded lossily, so a stray non-UTF-8 byte only spoils its own
/// cell. Records the `csv` crate cannot split are skipped with a warning; they
/// never abort the load.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .byte_headers()
        .map_err(|e| AppError::io(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(|field| normalize_header_name(&String::from_utf8_lossy(field)))
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.byte_records().enumerate() {
        match result {
            Ok(record) => rows.push(
                record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect(),
            ),
            // +2: header line plus 1-based numbering.
            Err(e) => warn!(line = idx + 2, error = %e, "skipping malformed CSV record"),
        }
    }

    Ok(RawTable::new(columns, rows))
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// Parse a numeric cell, or `None` if it is blank or unparsable.
///
/// Separators are normalized first: `12,345.6` and `12.345,6` both read as
/// 12345.6, a lone `12,5` reads as 12.5 and `1,234` as 1234.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return None;
    }
    if matches!(
        s.to_ascii_lowercase().as_str(),
        "nan" | "na" | "n/a" | "null" | "none" | ".." | "-"
    ) {
        return None;
    }

    let v = normalize_separators(&s).parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn normalize_separators(s: &str) -> String {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');

    match (last_comma, last_dot) {
        (None, _) => s.to_string(),
        // Dot is the decimal mark, commas group thousands.
        (Some(c), Some(d)) if d > c => s.replace(',', ""),
        // Comma is the decimal mark, dots group thousands.
        (Some(_), Some(_)) => s.replace('.', "").replace(',', "."),
        (Some(c), None) => {
            if s.matches(',').count() > 1 || looks_like_thousands(&s[..c], &s[c + 1..]) {
                s.replace(',', "")
            } else {
                s.replace(',', ".")
            }
        }
    }
}

fn looks_like_thousands(head: &str, tail: &str) -> bool {
    let head = head.trim_start_matches(['-', '+']);
    tail.len() == 3
        && tail.bytes().all(|b| b.is_ascii_digit())
        && (1..=3).contains(&head.len())
        && head.bytes().all(|b| b.is_ascii_digit())
        && head != "0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_handles_separator_conventions() {
        assert_eq!(parse_number("12,345.6"), Some(12345.6));
        assert_eq!(parse_number("12.345,6"), Some(12345.6));
        assert_eq!(parse_number("12,5"), Some(12.5));
        assert_eq!(parse_number("0,125"), Some(0.125));
        assert_eq!(parse_number("1,234"), Some(1234.0));
        assert_eq!(parse_number("1,234,567"), Some(1234567.0));
        assert_eq!(parse_number(" -3.5 "), Some(-3.5));
        assert_eq!(parse_number("1 234.5"), Some(1234.5));
    }

    #[test]
    fn parse_number_maps_junk_to_absent() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(".."), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn read_table_keeps_blank_cells_blank_and_pads_short_rows() {
        let csv = "\u{feff}Country,1990,1991,1992\nSouth Africa,1.0,2.0,\nKenya,3.0\n";
        let table = read_table(csv.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["Country", "1990", "1991", "1992"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 0), Some("South Africa"));
        assert_eq!(table.cell(0, 3), None);
        assert_eq!(table.cell(1, 1), Some("3.0"));
        assert_eq!(table.cell(1, 2), None);
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn read_table_keeps_rows_with_undecodable_bytes() {
        let csv = b"Country,1990,1991,1992\nSouth Africa,1.0,2.0,\x96\n";
        let table = read_table(&csv[..]).unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, 0), Some("South Africa"));
        assert_eq!(table.cell(0, 2), Some("2.0"));
        assert_eq!(table.cell(0, 3).and_then(parse_number), None);
    }

    #[test]
    fn read_table_tolerates_undecodable_header_bytes() {
        let csv = b"Pa\xe9s,1990,1991\nSouth Africa,1.0,2.0\n";
        let table = read_table(&csv[..]).unwrap();

        assert_eq!(table.columns().len(), 3);
        assert!(table.columns()[0].starts_with("Pa"));
        assert_eq!(table.columns()[1], "1990");
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn with_constant_column_leaves_source_untouched() {
        let table = read_table("TIME_PERIOD,OBS_VALUE\n1990,5.0\n".as_bytes()).unwrap();
        let enriched = table.with_constant_column("Country", "South Africa");

        assert_eq!(table.columns().len(), 2);
        assert_eq!(enriched.columns().len(), 3);
        assert_eq!(enriched.cell(0, 2), Some("South Africa"));
    }

    #[test]
    fn load_table_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert_eq!(load_table(&path).unwrap(), TableLoad::Missing(path));
    }

    #[test]
    fn load_table_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GDP.csv");
        std::fs::write(&path, "Country,1990,1991\nSouth Africa,1,2\n").unwrap();

        match load_table(&path).unwrap() {
            TableLoad::Loaded(t) => assert_eq!(t.row_count(), 1),
            TableLoad::Missing(p) => panic!("unexpected missing {}", p.display()),
        }
    }
}

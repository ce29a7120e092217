//! Debug bundle writer for inspecting how each input file was read.
//!
//! The bundle is a markdown file with the coverage, the KPIs, the detected
//! schemas, every extracted point and the aligned pair.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::domain::AnalysisConfig;
use crate::error::AppError;
use crate::extract::PreparedDataset;

/// Write `econ_debug_<country>_<timestamp>.md` under `dir` and return its path.
pub fn write_debug_bundle(dir: &Path, run: &RunOutput, config: &AnalysisConfig) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::io(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let slug: String = config
        .country
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let path = dir.join(format!("econ_debug_{slug}_{ts}.md"));

    let file = File::create(&path)
        .map_err(|e| AppError::io(format!("Failed to create debug file: {e}")))?;
    let mut file = BufWriter::new(file);

    writeln!(file, "# econ debug bundle").map_err(write_err)?;
    writeln!(file, "- generated: {}", Local::now().to_rfc3339()).map_err(write_err)?;
    writeln!(file, "- requested_country: {}", config.country).map_err(write_err)?;
    writeln!(file, "- default_country: {}", config.default_country).map_err(write_err)?;
    writeln!(file, "- period_pivot: {}", config.period_pivot).map_err(write_err)?;
    writeln!(file, "- ok: {}", run.bundle.ok).map_err(write_err)?;
    if let Some(error) = &run.bundle.error {
        writeln!(file, "- error: {error}").map_err(write_err)?;
    }

    let coverage = &run.bundle.meta.coverage;
    writeln!(file, "\n## Coverage").map_err(write_err)?;
    writeln!(file, "| series | min | max |").map_err(write_err)?;
    writeln!(file, "| - | - | - |").map_err(write_err)?;
    for (label, span) in [("gdp", &coverage.gdp), ("inflation", &coverage.inflation), ("both", &coverage.both)] {
        writeln!(file, "| {label} | {} | {} |", fmt_year(span.min), fmt_year(span.max)).map_err(write_err)?;
    }

    if let Some(a) = &run.bundle.analytics {
        let k = &a.kpi;
        writeln!(file, "\n## KPIs").map_err(write_err)?;
        writeln!(file, "| series | mean | std | min | max |").map_err(write_err)?;
        writeln!(file, "| - | - | - | - | - |").map_err(write_err)?;
        writeln!(
            file,
            "| gdp | {:.2} | {:.2} | {:.2} | {:.2} |",
            k.gdp_mean, k.gdp_std, k.gdp_min, k.gdp_max
        )
        .map_err(write_err)?;
        writeln!(
            file,
            "| inflation | {:.2} | {:.2} | {:.2} | {:.2} |",
            k.inflation_mean, k.inflation_std, k.inflation_min, k.inflation_max
        )
        .map_err(write_err)?;
        let corr = k
            .corr_gdp_inflation
            .map(|c| format!("{c:.2}"))
            .unwrap_or_else(|| "undefined".to_string());
        writeln!(file, "- records: {} | corr: {corr}", k.records).map_err(write_err)?;
    }

    write_dataset(&mut file, &run.gdp)?;
    write_dataset(&mut file, &run.inflation)?;

    writeln!(file, "\n## Aligned pair (n={})", run.pair.len()).map_err(write_err)?;
    writeln!(file, "| year | gdp | inflation |").map_err(write_err)?;
    writeln!(file, "| - | - | - |").map_err(write_err)?;
    for ((year, gdp), infl) in run.pair.years.iter().zip(&run.pair.gdp).zip(&run.pair.inflation) {
        writeln!(file, "| {year} | {gdp:.6} | {infl:.6} |").map_err(write_err)?;
    }

    file.flush().map_err(write_err)?;
    Ok(path)
}

fn write_dataset(file: &mut impl Write, dataset: &PreparedDataset) -> Result<(), AppError> {
    let facts = &dataset.facts;
    let meta = &dataset.extraction.meta;

    writeln!(file, "\n## Dataset: {}", dataset.key.as_str()).map_err(write_err)?;
    writeln!(file, "- raw_rows: {}", dataset.raw_rows).map_err(write_err)?;
    writeln!(file, "- schema: {}", facts.kind).map_err(write_err)?;
    writeln!(
        file,
        "- entity_column: {}{}",
        facts.entity_column.as_deref().unwrap_or("-"),
        if facts.entity_synthesized { " (synthesized)" } else { "" }
    )
    .map_err(write_err)?;
    if !facts.year_columns.is_empty() {
        writeln!(file, "- year_columns: {}", facts.year_columns.join(", ")).map_err(write_err)?;
    }
    if let (Some(time), Some(value)) = (&facts.time_column, &facts.value_column) {
        writeln!(file, "- time/value: {time} / {value}").map_err(write_err)?;
    }
    writeln!(file, "- used_entity: {}", facts.used_entity).map_err(write_err)?;
    writeln!(file, "- reason: {}", facts.reason).map_err(write_err)?;
    writeln!(
        file,
        "- points: {} present, {} blank",
        meta.non_null_points, meta.null_points
    )
    .map_err(write_err)?;
    writeln!(file, "- columns_preview: {}", meta.columns_preview.join(", ")).map_err(write_err)?;

    writeln!(file, "\n| year | value |").map_err(write_err)?;
    writeln!(file, "| - | - |").map_err(write_err)?;
    for point in &dataset.extraction.series.points {
        let value = match point.value {
            Some(v) => format!("{v:.6}"),
            None => "-".to_string(),
        };
        writeln!(file, "| {} | {value} |", point.year).map_err(write_err)?;
    }

    Ok(())
}

fn fmt_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::io(format!("Failed to write debug bundle: {e}"))
}

//! Shared analysis pipeline used by every front-end command.
//!
//! Loader -> schema detection -> extraction (once per dataset) -> alignment ->
//! derivation. Both datasets are prepared independently and each owns its
//! table, so the two sides run in parallel without sharing state.

use tracing::{info, warn};

use crate::align::align;
use crate::derive::derive_bundle;
use crate::domain::{AlignedPair, AnalysisConfig, DatasetKey, ResultBundle};
use crate::error::AppError;
use crate::extract::{PreparedDataset, Preview, prepare_dataset, preview_rows};
use crate::io::{DataSources, TableLoad, load_table};

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub bundle: ResultBundle,
    pub gdp: PreparedDataset,
    pub inflation: PreparedDataset,
    pub pair: AlignedPair,
}

/// Run the full pipeline for `config.country`.
pub fn run_analysis(sources: &DataSources, config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let (gdp, inflation) = rayon::join(
        || load_and_prepare(sources, DatasetKey::Gdp, config),
        || load_and_prepare(sources, DatasetKey::Inflation, config),
    );
    let gdp = gdp?;
    let inflation = inflation?;

    let pair = align(&gdp.extraction.series, &inflation.extraction.series);
    let bundle = derive_bundle(&config.country, &gdp, &inflation, &pair, config.period_pivot);

    if bundle.ok {
        info!(
            country = %bundle.country,
            years = pair.len(),
            "analysis complete"
        );
    } else {
        warn!(
            country = %bundle.country,
            gdp_points = gdp.extraction.series.non_null_count(),
            inflation_points = inflation.extraction.series.non_null_count(),
            "no overlapping years"
        );
    }

    Ok(RunOutput {
        bundle,
        gdp,
        inflation,
        pair,
    })
}

/// First `limit` non-null points of one dataset for the configured entity.
pub fn run_preview(
    sources: &DataSources,
    key: DatasetKey,
    config: &AnalysisConfig,
    limit: usize,
) -> Result<Preview, AppError> {
    let prepared = load_and_prepare(sources, key, config)?;

    Ok(Preview {
        ok: true,
        name: key.as_str().to_string(),
        title: key.title(prepared.used_entity()),
        entity: prepared.used_entity().to_string(),
        meta: prepared.extraction.meta.clone(),
        columns: vec!["year".to_string(), "value".to_string()],
        rows: preview_rows(&prepared.extraction.series, limit),
    })
}

fn load_and_prepare(
    sources: &DataSources,
    key: DatasetKey,
    config: &AnalysisConfig,
) -> Result<PreparedDataset, AppError> {
    let table = match load_table(sources.path(key))? {
        TableLoad::Loaded(table) => table,
        TableLoad::Missing(path) => {
            return Err(AppError::configuration(format!(
                "Input file '{}' disappeared. Searched:\n  {}\n  {}",
                path.display(),
                sources.gdp.display(),
                sources.inflation.display()
            )));
        }
    };

    Ok(prepare_dataset(
        key,
        &table,
        &sources.file_name(key),
        &config.country,
        &config.default_country,
    ))
}

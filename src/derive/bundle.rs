//! Assemble the `ResultBundle` from both prepared datasets and their aligned pair.

use crate::domain::{
    AlignedPair, BundleMeta, Coverage, DatasetsMeta, Diagnostics, ResultBundle, YearSpan,
};
use crate::derive::engine::derive_analytics;
use crate::extract::PreparedDataset;

pub const NO_OVERLAP_ERROR: &str =
    "No overlapping data after merge. Check year columns or country names.";

/// Build the bundle. An empty pair produces `ok: false` with diagnostics.
pub fn derive_bundle(
    requested: &str,
    gdp: &PreparedDataset,
    inflation: &PreparedDataset,
    pair: &AlignedPair,
    period_pivot: i32,
) -> ResultBundle {
    let used_country = gdp.used_entity().to_string();

    let diagnostics = Diagnostics {
        expected_country: requested.to_string(),
        used_country: used_country.clone(),
        gdp_rows: gdp.raw_rows,
        infl_rows: inflation.raw_rows,
        gdp_schema: gdp.facts.clone(),
        infl_schema: inflation.facts.clone(),
    };

    let meta = BundleMeta {
        datasets: DatasetsMeta {
            gdp: gdp.extraction.meta.clone(),
            inflation: inflation.extraction.meta.clone(),
        },
        coverage: Coverage {
            gdp: YearSpan::from_range(gdp.extraction.series.present_year_range()),
            inflation: YearSpan::from_range(inflation.extraction.series.present_year_range()),
            both: YearSpan::from_range(pair.years.first().zip(pair.years.last()).map(|(a, b)| (*a, *b))),
        },
    };

    let analytics = derive_analytics(pair, period_pivot);
    let error = analytics.is_none().then(|| NO_OVERLAP_ERROR.to_string());

    ResultBundle {
        ok: analytics.is_some(),
        error,
        country: used_country,
        diagnostics,
        meta,
        analytics,
    }
}

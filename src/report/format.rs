//! Formatted terminal output.
//!
//! Formatting lives in one place so the pipeline stays free of presentation
//! concerns and output changes stay localized.

use crate::domain::{
    DatasetKey, DatasetMeta, GrowthCategory, InflationCategory, ResultBundle, SchemaFacts,
    YearPerformance, YearSpan,
};
use crate::extract::Preview;
use crate::io::DataSources;

/// Format the full run summary: diagnostics, coverage and (when present) the
/// derived statistics.
pub fn format_run_summary(bundle: &ResultBundle) -> String {
    let mut out = String::new();
    let diag = &bundle.diagnostics;

    out.push_str("=== econ - GDP vs inflation ===\n");
    out.push_str(&format!(
        "Country: {} (requested: {})\n",
        diag.used_country, diag.expected_country
    ));
    out.push_str(&format!(
        "Rows: gdp={} | inflation={}\n",
        diag.gdp_rows, diag.infl_rows
    ));

    out.push_str("\nSchemas:\n");
    out.push_str(&format_schema("gdp", &diag.gdp_schema));
    out.push_str(&format_schema("inflation", &diag.infl_schema));

    out.push_str("\nCoverage:\n");
    out.push_str(&format!("  gdp       {}\n", fmt_span(&bundle.meta.coverage.gdp)));
    out.push_str(&format!("  inflation {}\n", fmt_span(&bundle.meta.coverage.inflation)));
    out.push_str(&format!("  both      {}\n", fmt_span(&bundle.meta.coverage.both)));

    let Some(a) = &bundle.analytics else {
        out.push_str(&format!(
            "\nerror: {}\n",
            bundle.error.as_deref().unwrap_or("no analytics")
        ));
        return out;
    };

    let k = &a.kpi;
    out.push_str(&format!("\nKPIs (n={}):\n", k.records));
    out.push_str(&format!(
        "  gdp       mean={:.2} std={:.2} min={:.2} max={:.2}\n",
        k.gdp_mean, k.gdp_std, k.gdp_min, k.gdp_max
    ));
    out.push_str(&format!(
        "  inflation mean={:.2} std={:.2} min={:.2} max={:.2}\n",
        k.inflation_mean, k.inflation_std, k.inflation_min, k.inflation_max
    ));
    out.push_str(&format!("  corr(gdp, inflation) = {}\n", fmt_opt(k.corr_gdp_inflation)));

    let s = &a.yoy.summary;
    out.push_str(&format!(
        "\nGDP year-over-year: {} up, {} down, {} flat\n",
        s.positive, s.negative, s.zero
    ));

    out.push_str(&format!(
        "Regression: gdp = {:.4} * inflation + {:.4} (inflation in [{:.2}, {:.2}])\n",
        a.regression.slope, a.regression.intercept, a.regression.x_min, a.regression.x_max
    ));

    let e = &a.extremes;
    out.push_str(&format!(
        "Extremes: gdp best {} ({:.2}) worst {} ({:.2}) | inflation best {} ({:.2}) worst {} ({:.2})\n",
        e.best_gdp.year,
        e.best_gdp.value,
        e.worst_gdp.year,
        e.worst_gdp.value,
        e.best_infl.year,
        e.best_infl.value,
        e.worst_infl.year,
        e.worst_infl.value
    ));

    out.push_str(&format_performance_tally(&a.performance));

    out.push_str("\nDecades:\n");
    out.push_str(
        format!("{:<8} {:>12} {:>12}\n", "decade", "gdp_mean", "infl_mean").trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<8} {:-<12} {:-<12}\n", "", "", "").trim_end());
    out.push('\n');
    for ((label, g), i) in a
        .decades
        .labels
        .iter()
        .zip(&a.decades.gdp_mean)
        .zip(&a.decades.infl_mean)
    {
        out.push_str(&format!("{label:<8} {g:>12.2} {i:>12.2}\n"));
    }

    let p = &a.periods;
    out.push_str(&format!("\nPeriods (pivot {}):\n", p.pivot));
    for (name, stats) in [("before", &p.before), ("after", &p.after)] {
        out.push_str(&format!(
            "  {name:<6} years={:<3} gdp={:.2}±{:.2} inflation={:.2}±{:.2}\n",
            stats.years, stats.gdp_mean, stats.gdp_std, stats.infl_mean, stats.infl_std
        ));
    }

    out
}

/// Format a preview as a small two-column table.
pub fn format_preview(preview: &Preview) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} [{}]\n", preview.title, preview.name));
    out.push_str(&format_meta(&preview.meta));
    out.push_str(format!("{:<6} {:>14}\n", "year", "value").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<6} {:-<14}\n", "", "").trim_end());
    out.push('\n');
    for row in &preview.rows {
        out.push_str(&format!("{:<6} {:>14.4}\n", row.year, row.value));
    }
    if preview.rows.is_empty() {
        out.push_str("(no values)\n");
    }

    out
}

/// List dataset keys with their titles and source files.
pub fn format_datasets(sources: &DataSources, country: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Data directory: {}\n", sources.dir.display()));
    for key in DatasetKey::ALL {
        out.push_str(&format!(
            "{:<10} {:<28} {}\n",
            key.as_str(),
            key.title(country),
            sources.file_name(key)
        ));
    }
    out
}

fn format_schema(label: &str, facts: &SchemaFacts) -> String {
    let entity = facts.entity_column.as_deref().unwrap_or("-");
    let layout = match facts.kind.as_str() {
        "wide" => format!("{} year columns", facts.year_columns.len()),
        "long" => format!(
            "time={} value={}",
            facts.time_column.as_deref().unwrap_or("-"),
            facts.value_column.as_deref().unwrap_or("-")
        ),
        _ => "unrecognised layout".to_string(),
    };
    let synthesized = if facts.entity_synthesized { " (synthesized)" } else { "" };
    format!(
        "  {label:<9} {:<7} entity={entity}{synthesized} | {layout} | {}\n",
        facts.kind, facts.reason
    )
}

fn format_meta(meta: &DatasetMeta) -> String {
    format!(
        "rows={} | years={}..{} | values={} | blanks={}\n",
        meta.row_count,
        fmt_year(meta.year_min),
        fmt_year(meta.year_max),
        meta.non_null_points,
        meta.null_points
    )
}

fn fmt_span(span: &YearSpan) -> String {
    match (span.min, span.max) {
        (Some(min), Some(max)) => format!("{min}..{max}"),
        _ => "-".to_string(),
    }
}

fn fmt_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

/// Count years per growth and inflation category, in band order.
fn format_performance_tally(rows: &[YearPerformance]) -> String {
    let growth = [
        GrowthCategory::High,
        GrowthCategory::Moderate,
        GrowthCategory::Decline,
        GrowthCategory::Unknown,
    ]
    .map(|c| format!("{} {}", c.label(), rows.iter().filter(|r| r.growth == c).count()));
    let inflation = [InflationCategory::Low, InflationCategory::Target, InflationCategory::High]
        .map(|c| format!("{} {}", c.label(), rows.iter().filter(|r| r.inflation == c).count()));
    format!(
        "Performance: {} | {}\n",
        growth.join(", "),
        inflation.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive_analytics;
    use crate::domain::{AlignedPair, BundleMeta, Coverage, DatasetsMeta, Diagnostics};
    use crate::extract::PreviewRow;

    fn bundle(pair: &AlignedPair) -> ResultBundle {
        let analytics = derive_analytics(pair, 1994);
        ResultBundle {
            ok: analytics.is_some(),
            error: analytics.is_none().then(|| "No overlapping data".to_string()),
            country: "South Africa".to_string(),
            diagnostics: Diagnostics {
                expected_country: "south africa".to_string(),
                used_country: "South Africa".to_string(),
                gdp_rows: 1,
                infl_rows: 3,
                gdp_schema: SchemaFacts {
                    kind: "wide".to_string(),
                    entity_column: Some("Country".to_string()),
                    year_columns: vec!["1990".to_string(), "1991".to_string()],
                    used_entity: "South Africa".to_string(),
                    reason: "matched".to_string(),
                    ..SchemaFacts::default()
                },
                infl_schema: SchemaFacts {
                    kind: "long".to_string(),
                    entity_column: Some("Country".to_string()),
                    entity_synthesized: true,
                    time_column: Some("TIME_PERIOD".to_string()),
                    value_column: Some("OBS_VALUE".to_string()),
                    ..SchemaFacts::default()
                },
            },
            meta: BundleMeta {
                datasets: DatasetsMeta {
                    gdp: DatasetMeta::empty("gdp"),
                    inflation: DatasetMeta::empty("inflation"),
                },
                coverage: Coverage::default(),
            },
            analytics,
        }
    }

    #[test]
    fn summary_includes_kpis_and_decades() {
        let pair = AlignedPair {
            years: vec![1990, 1991],
            gdp: vec![1.0, 2.0],
            inflation: vec![5.0, 6.0],
        };
        let txt = format_run_summary(&bundle(&pair));
        assert!(txt.contains("Country: South Africa (requested: south africa)"));
        assert!(txt.contains("inflation long    entity=Country (synthesized)"));
        assert!(txt.contains("corr(gdp, inflation) = 1.00"));
        assert!(txt.contains("1990s"));
        assert!(txt.contains("1 up, 0 down, 0 flat"));
        assert!(txt.contains(
            "Performance: High Growth 0, Moderate Growth 1, Recession/Decline 0, Unknown 1 | \
             Low Inflation 0, Target Range 2, High Inflation 0"
        ));
    }

    #[test]
    fn summary_of_failed_run_shows_error() {
        let txt = format_run_summary(&bundle(&AlignedPair::default()));
        assert!(txt.contains("error: No overlapping data"));
        assert!(txt.contains("both      -"));
        assert!(!txt.contains("KPIs"));
    }

    #[test]
    fn preview_table_lists_rows() {
        let preview = Preview {
            ok: true,
            name: "gdp".to_string(),
            title: "GDP (South Africa)".to_string(),
            entity: "South Africa".to_string(),
            meta: DatasetMeta::empty("gdp"),
            columns: vec!["year".to_string(), "value".to_string()],
            rows: vec![PreviewRow { year: 1990, value: 1.5 }],
        };
        let txt = format_preview(&preview);
        assert!(txt.starts_with("GDP (South Africa) [gdp]\n"));
        assert!(txt.lines().any(|l| l.starts_with("1990 ") && l.ends_with(" 1.5000")));
    }
}

//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the input files
//! - runs the pipeline or a preview
//! - prints reports/plots and writes optional exports

use std::path::Path;
use std::str::FromStr;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{AnalyzeArgs, Command, PlotArgs, PreviewArgs, SourceArgs};
use crate::domain::{AnalysisConfig, DatasetKey};
use crate::error::AppError;
use crate::io::DataSources;

pub mod pipeline;

/// Entry point for the `econ` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    init_logging();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Preview(args) => handle_preview(args),
        Command::Datasets(args) => handle_datasets(args),
        Command::Plot(args) => handle_plot(args),
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_logging() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(env).with_writer(std::io::stderr).try_init();
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let sources = DataSources::from_config(&config)?;
    let run = pipeline::run_analysis(&sources, &config)?;

    if args.json {
        println!("{}", crate::io::bundle_to_json(&run.bundle)?);
    } else {
        println!("{}", crate::report::format_run_summary(&run.bundle));
    }

    if config.plot && !args.json {
        println!(
            "{}",
            crate::plot::render_bundle_plots(&run.bundle, config.plot_width, config.plot_height)
        );
    }

    // Written for failed runs too.
    if let Some(path) = &config.export_json {
        crate::io::write_bundle_json(path, &run.bundle)?;
        info!(path = %path.display(), "bundle exported");
    }
    if config.debug_bundle {
        let path = crate::debug::write_debug_bundle(Path::new("debug"), &run, &config)?;
        info!(path = %path.display(), "debug bundle written");
    }

    match run.bundle.error {
        Some(error) if !run.bundle.ok => Err(AppError::empty_result(error)),
        _ => Ok(()),
    }
}

fn handle_preview(args: PreviewArgs) -> Result<(), AppError> {
    let key = match DatasetKey::from_str(&args.dataset) {
        Ok(key) => key,
        Err(err) => {
            let body = serde_json::json!({ "ok": false, "error": err.message() });
            println!("{body}");
            return Err(err);
        }
    };

    let config = config_from_source(&args.source);
    let sources = DataSources::from_config(&config)?;
    let preview = pipeline::run_preview(&sources, key, &config, args.limit)?;

    if args.json {
        let body = serde_json::to_string_pretty(&preview)
            .map_err(|e| AppError::io(format!("Failed to serialize preview: {e}")))?;
        println!("{body}");
    } else {
        println!("{}", crate::report::format_preview(&preview));
    }
    Ok(())
}

fn handle_datasets(args: SourceArgs) -> Result<(), AppError> {
    let config = config_from_source(&args);
    let sources = DataSources::from_config(&config)?;
    println!("{}", crate::report::format_datasets(&sources, &config.country));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let bundle = crate::io::read_bundle_json(&args.bundle)?;
    println!("{}", crate::plot::render_bundle_plots(&bundle, args.width, args.height));
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        period_pivot: args.pivot,
        export_json: args.export.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        debug_bundle: args.debug_bundle,
        ..config_from_source(&args.source)
    }
}

fn config_from_source(args: &SourceArgs) -> AnalysisConfig {
    AnalysisConfig {
        data_dir: args.data_dir.clone(),
        gdp_file: args.gdp_file.clone(),
        inflation_file: args.inflation_file.clone(),
        country: args.country.clone(),
        default_country: args.default_country.clone(),
        ..AnalysisConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    #[test]
    fn analyze_args_map_onto_config() {
        let cli = Cli::parse_from([
            "econ", "analyze", "--data-dir", "data", "--country", "Kenya", "--pivot", "2000",
            "--export", "out.json", "--plot",
        ]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };

        let config = analysis_config_from_args(&args);
        assert_eq!(config.country, "Kenya");
        assert_eq!(config.default_country, "South Africa");
        assert_eq!(config.period_pivot, 2000);
        assert_eq!(config.export_json.as_deref(), Some(Path::new("out.json")));
        assert!(config.plot);
        assert!(!config.debug_bundle);
        assert_eq!(config.inflation_file, "Inflation1.csv");
    }
}

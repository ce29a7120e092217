//! Command-line parsing for the GDP/inflation reconciliation tool.
//!
//! Argument parsing and command dispatch stay separate from the pipeline so
//! the library can be driven from other front-ends.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::DEFAULT_COUNTRY;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "econ", version, about = "Reconcile GDP and inflation series and derive statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline and print a summary (or the JSON bundle).
    Analyze(AnalyzeArgs),
    /// Show the first non-null (year, value) rows of one dataset.
    Preview(PreviewArgs),
    /// List the dataset keys accepted by `preview`.
    Datasets(SourceArgs),
    /// Plot a previously exported result bundle.
    Plot(PlotArgs),
}

/// Where the input files live and which entity to pull out.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Directory containing both CSV files (falls back to ECON_DATASETS).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// GDP file name inside the data directory.
    #[arg(long, default_value = "GDP.csv")]
    pub gdp_file: String,

    /// Inflation file name inside the data directory.
    #[arg(long, default_value = "Inflation1.csv")]
    pub inflation_file: String,

    /// Entity (country) to extract, matched case-insensitively.
    #[arg(short = 'c', long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Entity assumed for files without an entity column.
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub default_country: String,
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// First year of the "after" side of the period split.
    #[arg(long, default_value_t = 1994)]
    pub pivot: i32,

    /// Print the full JSON bundle instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Write the JSON bundle to a file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Render ASCII charts after the summary.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Write a markdown diagnostics bundle under `debug/`.
    #[arg(long)]
    pub debug_bundle: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dataset to preview: `gdp` or `inflation`.
    pub dataset: String,

    /// Maximum number of rows.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,

    /// Print the preview as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Options for plotting a saved bundle.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Bundle JSON file produced by `econ analyze --export`.
    #[arg(long, value_name = "JSON")]
    pub bundle: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

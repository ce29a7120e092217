//! `econ-series` library crate.
//!
//! Loads a GDP file and an inflation file of unknown layout, pulls one
//! country's annual series out of each, aligns them on common years and
//! derives the summary statistics a dashboard needs.
//!
//! The binary (`econ`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the pipeline can be reused by other front-ends
//! - code stays easy to navigate as the project grows

pub mod align;
pub mod app;
pub mod cli;
pub mod debug;
pub mod derive;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod plot;
pub mod report;
pub mod schema;
pub mod stats;

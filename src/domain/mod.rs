//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - schema detection results (`SchemaKind`, `DetectedSchema`)
//! - extracted and aligned series (`Series`, `AlignedPair`)
//! - run configuration (`AnalysisConfig`)
//! - the serialized output contract (`ResultBundle` and its parts)

pub mod bundle;
pub mod types;

pub use bundle::*;
pub use types::*;

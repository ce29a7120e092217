//! Table orientation and entity-column detection.

pub mod detect;

pub use detect::*;

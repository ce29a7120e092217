//! Terminal reporting: run summaries, previews and the dataset listing.

pub mod format;

pub use format::*;

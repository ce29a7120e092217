//! Terminal charts for a result bundle.

pub mod ascii;

pub use ascii::*;

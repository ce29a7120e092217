//! Input/output helpers.
//!
//! - CSV loading into raw tables (`table`)
//! - data directory resolution (`sources`)
//! - result bundle JSON read/write (`export`)

pub mod export;
pub mod sources;
pub mod table;

pub use export::*;
pub use sources::*;
pub use table::*;

//! Series extraction.
//!
//! - per-schema extraction strategies + dataset metadata (`series`)
//! - entity-column reconciliation around extraction (`entity`)
//! - non-null previews (`preview`)

pub mod entity;
pub mod preview;
pub mod series;

pub use entity::*;
pub use preview::*;
pub use series::*;

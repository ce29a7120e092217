//! Derivation engine: turns an aligned pair into the full result bundle.

pub mod bundle;
pub mod engine;

pub use bundle::*;
pub use engine::*;

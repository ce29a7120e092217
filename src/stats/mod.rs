//! Numeric kernels: descriptive statistics, rolling windows, linear
//! regression and histograms.

pub mod descriptive;
pub mod histogram;
pub mod regression;
pub mod rolling;

pub use descriptive::*;
pub use histogram::*;
pub use regression::*;
pub use rolling::*;

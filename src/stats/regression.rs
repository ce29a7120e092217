//! Simple linear regression by closed-form sums.
//!
//! ```text
//! slope     = Σ (x_i - x̄)(y_i - ȳ) / Σ (x_i - x̄)^2
//! intercept = ȳ - slope * x̄
//! ```
//!
//! With zero variance in `x` the slope is defined as 0 and the intercept as ȳ,
//! so a constant regressor never divides by zero.

use crate::stats::descriptive::mean;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares of `y` on `x`.
///
/// Returns `None` for empty or mismatched inputs.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() != y.len() {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx) * (a - mx);
    }

    if sxx == 0.0 {
        return Some(LinearFit {
            slope: 0.0,
            intercept: my,
        });
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: my - slope * mx,
    })
}

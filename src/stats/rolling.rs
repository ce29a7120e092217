//! Fixed-size sliding windows. Only full windows are emitted.

use crate::stats::descriptive::{mean, pstdev};

/// Mean of every full window: `len - window + 1` values, or none if too short.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    values.windows(window).filter_map(mean).collect()
}

/// Population standard deviation of every full window.
pub fn rolling_pstdev(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    values.windows(window).filter_map(pstdev).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_length_is_n_minus_window_plus_one() {
        for n in 0usize..9 {
            let values: Vec<f64> = (0..n).map(|v| v as f64).collect();
            assert_eq!(rolling_mean(&values, 5).len(), n.saturating_sub(4));
            assert_eq!(rolling_pstdev(&values, 5).len(), n.saturating_sub(4));
        }
    }

    #[test]
    fn windows_are_fully_inside_the_data() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 11.0];
        assert_eq!(rolling_mean(&values, 5), vec![3.0, 5.0]);

        let std = rolling_pstdev(&values, 5);
        assert!((std[0] - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_window_is_empty() {
        assert!(rolling_mean(&[1.0, 2.0], 0).is_empty());
    }
}

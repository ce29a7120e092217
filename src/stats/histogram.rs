//! Equal-width histogram over `[min, max]`.
//!
//! The upper boundary is closed: a value equal to the maximum lands in the last
//! bin. If every value is identical there is a single bin holding all of them.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub centers: Vec<f64>,
    pub counts: Vec<usize>,
}

pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let (Some(lo), Some(hi)) = (
        crate::stats::descriptive::min(values),
        crate::stats::descriptive::max(values),
    ) else {
        return Histogram::default();
    };

    if bins == 0 {
        return Histogram::default();
    }
    if hi == lo {
        return Histogram {
            centers: vec![lo],
            counts: vec![values.len()],
        };
    }

    // Halved endpoints keep the span finite even when `hi - lo` overflows.
    let half_span = hi * 0.5 - lo * 0.5;
    let last = bins - 1;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = if v >= hi {
            last
        } else {
            let frac = (v * 0.5 - lo * 0.5) / half_span;
            if frac.is_finite() {
                ((frac * bins as f64).floor() as usize).min(last)
            } else {
                0
            }
        };
        counts[idx] += 1;
    }

    let centers = (0..bins)
        .map(|i| {
            let t = (i as f64 + 0.5) / bins as f64;
            lo * (1.0 - t) + hi * t
        })
        .collect();

    Histogram { centers, counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximum_lands_in_last_bin() {
        let h = histogram(&[0.0, 1.0, 2.0, 10.0], 10);
        assert_eq!(h.counts.len(), 10);
        assert_eq!(h.counts[9], 1);
        assert_eq!(h.counts[0], 1);
        assert_eq!(h.counts[1], 1);
        assert_eq!(h.counts[2], 1);
        assert_eq!(h.counts.iter().sum::<usize>(), 4);
        assert!((h.centers[0] - 0.5).abs() < 1e-12);
        assert!((h.centers[9] - 9.5).abs() < 1e-12);
    }

    #[test]
    fn extreme_range_keeps_maximum_in_last_bin() {
        let h = histogram(&[-1.0e308, 0.0, 1.0e308], 10);
        assert_eq!(h.counts, vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 1]);
        assert!(h.centers.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn constant_values_give_single_bin() {
        let h = histogram(&[3.0, 3.0, 3.0], 10);
        assert_eq!(h.centers, vec![3.0]);
        assert_eq!(h.counts, vec![3]);
    }

    #[test]
    fn empty_input_gives_empty_histogram() {
        assert_eq!(histogram(&[], 10), Histogram::default());
    }

    #[test]
    fn awkward_steps_never_overflow_the_last_bin() {
        let values: Vec<f64> = (0..=30).map(|i| 0.1 * i as f64).collect();
        let h = histogram(&values, 10);
        assert_eq!(h.counts.len(), 10);
        assert_eq!(h.counts.iter().sum::<usize>(), values.len());
    }
}

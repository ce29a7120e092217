//! Inner-join two series on years where both carry a value.
//!
//! Years populated in only one series are dropped. Nothing is imputed or
//! forward-filled.

use std::collections::BTreeMap;

use crate::domain::{AlignedPair, Series};

/// Align GDP and inflation on their common, fully-populated years.
pub fn align(gdp: &Series, inflation: &Series) -> AlignedPair {
    let infl: BTreeMap<i32, f64> = inflation.present().collect();

    let mut out = AlignedPair::default();
    for (year, g) in gdp.present() {
        if let Some(&i) = infl.get(&year) {
            out.years.push(year);
            out.gdp.push(g);
            out.inflation.push(i);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesPoint;

    fn series(points: &[(i32, Option<f64>)]) -> Series {
        Series::from_points(points.iter().map(|&(year, value)| SeriesPoint { year, value }))
    }

    #[test]
    fn drops_years_missing_in_either_series() {
        let gdp = series(&[(1990, Some(1.0)), (1991, Some(2.0)), (1992, None), (1993, Some(4.0))]);
        let infl = series(&[(1990, Some(5.0)), (1991, Some(6.0)), (1992, Some(7.0)), (1994, Some(8.0))]);

        let pair = align(&gdp, &infl);
        assert_eq!(pair.years, vec![1990, 1991]);
        assert_eq!(pair.gdp, vec![1.0, 2.0]);
        assert_eq!(pair.inflation, vec![5.0, 6.0]);
    }

    #[test]
    fn aligned_lengths_always_agree() {
        let gdp = series(&[(2000, Some(1.0)), (2001, None), (2002, Some(3.0)), (2003, Some(3.5))]);
        let infl = series(&[(2001, Some(1.0)), (2002, None), (2003, Some(2.0)), (2000, Some(0.5))]);

        let pair = align(&gdp, &infl);
        assert_eq!(pair.years.len(), pair.gdp.len());
        assert_eq!(pair.years.len(), pair.inflation.len());
        assert_eq!(pair.years, vec![2000, 2003]);
        for (idx, year) in pair.years.iter().enumerate() {
            assert!(gdp.present().any(|(y, v)| y == *year && v == pair.gdp[idx]));
            assert!(infl.present().any(|(y, v)| y == *year && v == pair.inflation[idx]));
        }
    }

    #[test]
    fn disjoint_ranges_give_empty_pair() {
        let gdp = series(&[(1960, Some(1.0)), (1970, Some(2.0))]);
        let infl = series(&[(1980, Some(1.0)), (1990, Some(2.0))]);
        assert!(align(&gdp, &infl).is_empty());
    }
}

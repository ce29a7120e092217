//! Derived statistics and chart series for an aligned GDP/inflation pair.
//!
//! Conventions:
//! - standard deviations are population (divide by N)
//! - the regression is GDP on inflation
//! - `cum_gdp` is the running sum of GDP deltas, starting at 0
//! - the histogram covers the aligned inflation values
//! - KPI and summary figures are rounded to 2 dp, series to 6 dp

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    AlignedPair, AlignedSeries, Analytics, Decades, DeltaSummary, Era, Extra, Extremes,
    GrowthCategory, InflationCategory, Kpi, PeriodSplit, PeriodStats, Regression, Rolling,
    YearOverYear, YearPerformance, YearValue,
};
use crate::stats::{
    argmax, argmin, fit_line, histogram, max, mean, min, pearson, pstdev, rolling_mean, rolling_pstdev,
    round_to,
};

pub const ROLLING_WINDOW: usize = 5;
pub const HISTOGRAM_BINS: usize = 10;
pub const SUMMARY_PLACES: i32 = 2;
pub const SERIES_PLACES: i32 = 6;

/// Compute every derived block. Returns `None` for an empty pair.
pub fn derive_analytics(pair: &AlignedPair, period_pivot: i32) -> Option<Analytics> {
    if pair.is_empty() {
        return None;
    }

    let gdp_deltas = deltas(&pair.gdp);
    let infl_deltas = deltas(&pair.inflation);
    let gdp_yoy = round_all(&gdp_deltas, SERIES_PLACES);

    Some(Analytics {
        kpi: kpi(pair)?,
        series: AlignedSeries {
            years: pair.years.clone(),
            gdp: round_all(&pair.gdp, SERIES_PLACES),
            inflation: round_all(&pair.inflation, SERIES_PLACES),
        },
        yoy: YearOverYear {
            years: pair.years.iter().skip(1).copied().collect(),
            gdp: gdp_yoy.clone(),
            inflation: round_all(&infl_deltas, SERIES_PLACES),
            summary: tally_signs(&gdp_deltas),
        },
        rolling: rolling(pair),
        decades: decades(pair),
        regression: regression(pair)?,
        extra: extra(pair, &gdp_deltas),
        periods: period_split(pair, period_pivot),
        extremes: extremes(pair)?,
        performance: performance(pair, &gdp_yoy, period_pivot),
    })
}

fn kpi(pair: &AlignedPair) -> Option<Kpi> {
    let summary = |v: Option<f64>| v.map(|v| round_to(v, SUMMARY_PLACES));
    Some(Kpi {
        records: pair.len(),
        unique_years: pair.years.iter().collect::<BTreeSet<_>>().len(),
        inflation_mean: summary(mean(&pair.inflation))?,
        inflation_std: summary(pstdev(&pair.inflation))?,
        inflation_min: summary(min(&pair.inflation))?,
        inflation_max: summary(max(&pair.inflation))?,
        gdp_mean: summary(mean(&pair.gdp))?,
        gdp_std: summary(pstdev(&pair.gdp))?,
        gdp_min: summary(min(&pair.gdp))?,
        gdp_max: summary(max(&pair.gdp))?,
        corr_gdp_inflation: summary(pearson(&pair.gdp, &pair.inflation)),
    })
}

fn deltas(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

fn tally_signs(deltas: &[f64]) -> DeltaSummary {
    let mut out = DeltaSummary::default();
    for &d in deltas {
        if d > 0.0 {
            out.positive += 1;
        } else if d < 0.0 {
            out.negative += 1;
        } else {
            out.zero += 1;
        }
    }
    out
}

fn rolling(pair: &AlignedPair) -> Rolling {
    let years = if pair.len() >= ROLLING_WINDOW {
        pair.years[ROLLING_WINDOW - 1..].to_vec()
    } else {
        Vec::new()
    };
    Rolling {
        window: ROLLING_WINDOW,
        years,
        gdp_ma: round_all(&rolling_mean(&pair.gdp, ROLLING_WINDOW), SERIES_PLACES),
        infl_ma: round_all(&rolling_mean(&pair.inflation, ROLLING_WINDOW), SERIES_PLACES),
        gdp_std: round_all(&rolling_pstdev(&pair.gdp, ROLLING_WINDOW), SERIES_PLACES),
        infl_std: round_all(&rolling_pstdev(&pair.inflation, ROLLING_WINDOW), SERIES_PLACES),
    }
}

/// Decade start for a year, e.g. 1961 -> 1960.
pub fn decade_start(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

fn decades(pair: &AlignedPair) -> Decades {
    let mut buckets: BTreeMap<i32, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for ((&year, &g), &i) in pair.years.iter().zip(&pair.gdp).zip(&pair.inflation) {
        let bucket = buckets.entry(decade_start(year)).or_default();
        bucket.0.push(g);
        bucket.1.push(i);
    }

    let mut out = Decades {
        labels: Vec::with_capacity(buckets.len()),
        gdp_mean: Vec::with_capacity(buckets.len()),
        infl_mean: Vec::with_capacity(buckets.len()),
    };
    for (start, (g, i)) in buckets {
        out.labels.push(format!("{start}s"));
        out.gdp_mean.push(round_to(mean(&g).unwrap_or(0.0), SUMMARY_PLACES));
        out.infl_mean.push(round_to(mean(&i).unwrap_or(0.0), SUMMARY_PLACES));
    }
    out
}

fn regression(pair: &AlignedPair) -> Option<Regression> {
    let fit = fit_line(&pair.inflation, &pair.gdp)?;
    Some(Regression {
        slope: round_to(fit.slope, SERIES_PLACES),
        intercept: round_to(fit.intercept, SERIES_PLACES),
        x_min: round_to(min(&pair.inflation)?, SERIES_PLACES),
        x_max: round_to(max(&pair.inflation)?, SERIES_PLACES),
    })
}

fn extra(pair: &AlignedPair, gdp_deltas: &[f64]) -> Extra {
    let mut cum_gdp = Vec::with_capacity(pair.len());
    let mut acc = 0.0;
    cum_gdp.push(acc);
    for d in gdp_deltas {
        acc += d;
        cum_gdp.push(round_to(acc, SERIES_PLACES));
    }

    let hist = histogram(&pair.inflation, HISTOGRAM_BINS);
    Extra {
        cum_gdp,
        infl_hist_centers: round_all(&hist.centers, SERIES_PLACES),
        infl_hist_counts: hist.counts,
    }
}

fn period_split(pair: &AlignedPair, pivot: i32) -> PeriodSplit {
    let side = |keep: &dyn Fn(i32) -> bool| {
        let mut g = Vec::new();
        let mut i = Vec::new();
        for ((&year, &gv), &iv) in pair.years.iter().zip(&pair.gdp).zip(&pair.inflation) {
            if keep(year) {
                g.push(gv);
                i.push(iv);
            }
        }
        let stat = |v: Option<f64>| round_to(v.unwrap_or(0.0), SUMMARY_PLACES);
        PeriodStats {
            years: g.len(),
            gdp_mean: stat(mean(&g)),
            gdp_std: stat(pstdev(&g)),
            infl_mean: stat(mean(&i)),
            infl_std: stat(pstdev(&i)),
        }
    };

    PeriodSplit {
        pivot,
        before: side(&|y: i32| y < pivot),
        after: side(&|y: i32| y >= pivot),
    }
}

fn extremes(pair: &AlignedPair) -> Option<Extremes> {
    let at = |values: &[f64], idx: usize| YearValue {
        year: pair.years[idx],
        value: round_to(values[idx], SERIES_PLACES),
    };
    Some(Extremes {
        best_gdp: at(&pair.gdp, argmax(&pair.gdp)?),
        worst_gdp: at(&pair.gdp, argmin(&pair.gdp)?),
        best_infl: at(&pair.inflation, argmin(&pair.inflation)?),
        worst_infl: at(&pair.inflation, argmax(&pair.inflation)?),
    })
}

/// Label every aligned year. Growth uses the reported (rounded) GDP change, so
/// the first year, which has none, is `Unknown`.
fn performance(pair: &AlignedPair, gdp_yoy: &[f64], pivot: i32) -> Vec<YearPerformance> {
    pair.years
        .iter()
        .zip(&pair.inflation)
        .enumerate()
        .map(|(i, (&year, &rate))| YearPerformance {
            year,
            growth: GrowthCategory::classify(i.checked_sub(1).and_then(|j| gdp_yoy.get(j).copied())),
            inflation: InflationCategory::classify(round_to(rate, SERIES_PLACES)),
            era: Era::for_year(year, pivot),
        })
        .collect()
}

fn round_all(values: &[f64], places: i32) -> Vec<f64> {
    values.iter().map(|&v| round_to(v, places)).collect()
}

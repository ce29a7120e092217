//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observations: `o`
//! - series path or fitted line: `-`
//! - histogram bars: `#`

use crate::domain::{Regression, ResultBundle};

/// Render every chart that a bundle supports, separated by blank lines.
pub fn render_bundle_plots(bundle: &ResultBundle, width: usize, height: usize) -> String {
    let Some(a) = &bundle.analytics else {
        return format!(
            "Nothing to plot: {}\n",
            bundle.error.as_deref().unwrap_or("no analytics")
        );
    };

    [
        render_line_plot("GDP", &a.series.years, &a.series.gdp, width, height),
        render_line_plot("Inflation", &a.series.years, &a.series.inflation, width, height),
        render_scatter_plot(&a.series.inflation, &a.series.gdp, &a.regression, width, height),
        render_histogram(&a.extra.infl_hist_centers, &a.extra.infl_hist_counts, width),
    ]
    .join("\n")
}

/// Plot one series against year, joined by a line.
pub fn render_line_plot(title: &str, years: &[i32], values: &[f64], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let xs: Vec<f64> = years.iter().map(|&y| f64::from(y)).collect();
    let (x_min, x_max) = range(&xs).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = range(values).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let points: Vec<(f64, f64)> = xs.iter().copied().zip(values.iter().copied()).collect();

    let mut grid = vec![vec![' '; width]; height];
    draw_path(&mut grid, &points, x_min, x_max, y_min, y_max);
    for &(x, y) in &points {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
    }

    let mut out = format!(
        "{title}: years=[{x_min:.0}, {x_max:.0}] | y=[{y_min:.2}, {y_max:.2}]\n"
    );
    push_grid(&mut out, grid);
    out
}

/// Scatter GDP against inflation with the fitted regression line underneath.
pub fn render_scatter_plot(
    inflation: &[f64],
    gdp: &[f64],
    fit: &Regression,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = if fit.x_max > fit.x_min {
        (fit.x_min, fit.x_max)
    } else {
        range(inflation).unwrap_or((0.0, 1.0))
    };
    let line = [
        (x_min, fit.intercept + fit.slope * x_min),
        (x_max, fit.intercept + fit.slope * x_max),
    ];

    let mut ys: Vec<f64> = gdp.to_vec();
    ys.extend(line.iter().map(|&(_, y)| y));
    let (y_min, y_max) = range(&ys).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    // Line first so observations overlay it.
    draw_path(&mut grid, &line, x_min, x_max, y_min, y_max);
    for (&x, &y) in inflation.iter().zip(gdp) {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
    }

    let mut out = format!(
        "Plot: inflation=[{x_min:.3}, {x_max:.3}] | gdp=[{y_min:.2}, {y_max:.2}]\n"
    );
    push_grid(&mut out, grid);
    out
}

/// Horizontal bar chart of the inflation histogram.
pub fn render_histogram(centers: &[f64], counts: &[usize], width: usize) -> String {
    let bar_width = width.saturating_sub(20).max(10);
    let max_count = counts.iter().copied().max().unwrap_or(0);

    let mut out = String::from("Inflation histogram:\n");
    for (center, &count) in centers.iter().zip(counts) {
        let len = if max_count == 0 {
            0
        } else {
            (count as f64 / max_count as f64 * bar_width as f64).round() as usize
        };
        out.push_str(
            format!("{center:>8.2} | {} {count}", "#".repeat(len)).as_str(),
        );
        out.push('\n');
    }
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else if min.is_finite() && max.is_finite() {
        Some((min - 0.5, max + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_path(grid: &mut [Vec<char>], points: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if points.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_golden_snapshot_small() {
        let fit = Regression {
            slope: 0.0,
            intercept: 100.0,
            x_min: 1.0,
            x_max: 10.0,
        };

        let txt = render_scatter_plot(&[1.0, 10.0], &[100.0, 110.0], &fit, 10, 5);
        let expected = concat!(
            "Plot: inflation=[1.000, 10.000] | gdp=[99.50, 110.50]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn line_golden_snapshot_small() {
        let txt = render_line_plot("GDP", &[2000, 2001, 2002], &[1.0, 2.0, 3.0], 10, 5);
        let expected = concat!(
            "GDP: years=[2000, 2002] | y=[0.90, 3.10]\n",
            "        -o\n",
            "      --  \n",
            "    -o    \n",
            "  --      \n",
            "o-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn histogram_bars_scale_to_largest_bin() {
        let txt = render_histogram(&[0.5, 1.5, 2.5], &[1, 3, 0], 30);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "Inflation histogram:");
        assert_eq!(lines[1], "    0.50 | ### 1");
        assert_eq!(lines[2], "    1.50 | ########## 3");
        assert_eq!(lines[3], "    2.50 |  0");
    }

    #[test]
    fn failed_bundle_has_nothing_to_plot() {
        use crate::domain::{BundleMeta, Coverage, DatasetMeta, DatasetsMeta, Diagnostics, SchemaFacts};

        let bundle = ResultBundle {
            ok: false,
            error: Some("No overlapping data".to_string()),
            country: "South Africa".to_string(),
            diagnostics: Diagnostics {
                expected_country: "South Africa".to_string(),
                used_country: "South Africa".to_string(),
                gdp_rows: 0,
                infl_rows: 0,
                gdp_schema: SchemaFacts::default(),
                infl_schema: SchemaFacts::default(),
            },
            meta: BundleMeta {
                datasets: DatasetsMeta {
                    gdp: DatasetMeta::empty("gdp"),
                    inflation: DatasetMeta::empty("inflation"),
                },
                coverage: Coverage::default(),
            },
            analytics: None,
        };
        assert_eq!(render_bundle_plots(&bundle, 40, 8), "Nothing to plot: No overlapping data\n");
    }
}

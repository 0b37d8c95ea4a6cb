//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - samples: `o` (primary curve), `x` (comparison curve)
//! - elastic fit lines: `-` (primary), `.` (comparison), drawn from strain 0 up to
//!   the peak strain and clipped to the stress range of the data

use crate::app::pipeline::RunOutput;
use crate::domain::{Curve, FitResult};

const POINT_GLYPHS: [char; 2] = ['o', 'x'];
const FIT_GLYPHS: [char; 2] = ['-', '.'];

/// A curve and its optional fit, as drawn on the grid.
struct Series<'a> {
    curve: &'a Curve,
    fit: Option<&'a FitResult>,
    fit_end: f64,
}

/// Render every loaded curve of a run, plus its fit line.
pub fn render_ascii_plot(run: &RunOutput, title: &str, width: usize, height: usize) -> String {
    let series: Vec<Series<'_>> = run
        .outcomes
        .iter()
        .filter_map(|o| {
            let curve = o.curve()?;
            let fit_end = o
                .failure()
                .map(|f| f.peak_strain)
                .unwrap_or_else(|| curve.strain().iter().copied().fold(f64::NEG_INFINITY, f64::max));
            Some(Series {
                curve,
                fit: o.fit(),
                fit_end,
            })
        })
        .collect();

    render_plot(&series, title, width, height)
}

fn render_plot(series: &[Series<'_>], title: &str, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Fit lines first (so samples can overlay).
    for (i, s) in series.iter().enumerate() {
        if let Some(fit) = s.fit {
            let glyph = FIT_GLYPHS[i.min(FIT_GLYPHS.len() - 1)];
            let line = sample_fit(fit, x_min.max(0.0), s.fit_end, width);
            draw_clipped(&mut grid, &line, (x_min, x_max), (y_min, y_max), glyph);
        }
    }

    for (i, s) in series.iter().enumerate() {
        let glyph = POINT_GLYPHS[i.min(POINT_GLYPHS.len() - 1)];
        for (strain, stress) in s.curve.samples() {
            let x = map_x(strain, x_min, x_max, width);
            let y = map_y(stress, y_min, y_max, height);
            grid[y][x] = glyph;
        }
    }

    // Header with title and ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "{title}: strain=[{x_min:.3}, {x_max:.3}] | stress=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(series: &[Series<'_>]) -> Option<(f64, f64)> {
    let mut min_x = 0.0f64;
    let mut max_x = f64::NEG_INFINITY;
    for s in series {
        for &x in s.curve.strain() {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
    }
    if max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(series: &[Series<'_>]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for s in series {
        for &y in s.curve.stress() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn sample_fit(fit: &FitResult, x_start: f64, x_end: f64, n: usize) -> Vec<(f64, f64)> {
    if x_end.is_nan() || x_end <= x_start {
        return Vec::new();
    }
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_start + u * (x_end - x_start);
            (x, fit.predict(x))
        })
        .collect()
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

/// Draw a polyline, skipping points outside the stress range.
fn draw_clipped(grid: &mut [Vec<char>], line: &[(f64, f64)], xr: (f64, f64), yr: (f64, f64), ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in line {
        if !(yr.0..=yr.1).contains(&y) {
            prev = None;
            continue;
        }
        let gx = map_x(x, xr.0, xr.1, width);
        let gy = map_y(y, yr.0, yr.1, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, gx, gy, ch),
            None => {
                if grid[gy][gx] == ' ' {
                    grid[gy][gx] = ch;
                }
            }
        }
        prev = Some((gx, gy));
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
    use crate::domain::FitMode;

    #[test]
    fn plot_golden_snapshot_small() {
        let curve = Curve::from_pairs("c", [(0.0, 0.0), (1.0, 10.0)]);
        let fit = FitResult {
            mode: FitMode::ZeroIntercept,
            slope: 10.0,
            intercept: None,
            window: 2,
        };
        let series = [Series {
            curve: &curve,
            fit: Some(&fit),
            fit_end: 1.0,
        }];

        let txt = render_plot(&series, "Tensile", 10, 5);
        let expected = concat!(
            "Tensile: strain=[0.000, 1.000] | stress=[-0.50, 10.50]\n",
            "         o\n",
            "      --- \n",
            "    --    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn samples_without_fit_are_plotted() {
        let curve = Curve::from_pairs("c", [(0.0, 1.0), (0.5, 3.0), (1.0, 2.0)]);
        let series = [Series {
            curve: &curve,
            fit: None,
            fit_end: 0.5,
        }];

        let txt = render_plot(&series, "T", 10, 5);
        assert_eq!(txt.lines().count(), 6);
        assert_eq!(txt.matches('o').count(), 3);
        assert!(!txt.contains('-'));
    }
}

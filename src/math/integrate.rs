//! Trapezoidal integration over unevenly spaced samples.

/// Integrate `y` with respect to `x` using the trapezoidal rule.
///
/// Only the common prefix of `x` and `y` is used. Fewer than two samples
/// integrate to `0.0`.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    (1..n)
        .map(|i| 0.5 * (x[i] - x[i - 1]) * (y[i] + y[i - 1]))
        .sum()
}

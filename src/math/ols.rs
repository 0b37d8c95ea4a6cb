//! Least squares solver.
//!
//! The affine elastic fit solves a small regression problem of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! with a tall design matrix (one row per windowed sample, two columns).
//!
//! Implementation choices:
//! - We use SVD so tall systems are handled without forming normal equations.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - SVD returns a minimum-norm answer for rank-deficient systems. Callers that
//!   need to reject a degenerate regressor must check for it before solving.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Design matrix with an intercept column followed by `x`.
pub fn affine_design(x: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), 2, |i, j| if j == 0 { 1.0 } else { x[i] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = affine_design(&[0.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert_abs_diff_eq!(beta[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(beta[1], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn least_squares_minimizes_residuals_for_noisy_data() {
        // Closed form: Sxy = 4.8, Sxx = 5.0.
        let x = affine_design(&[0.0, 1.0, 2.0, 3.0]);
        let y = DVector::from_row_slice(&[1.1, 1.9, 3.1, 3.9]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert_abs_diff_eq!(beta[1], 0.96, epsilon = 1e-10);
        assert_abs_diff_eq!(beta[0], 1.06, epsilon = 1e-10);
    }
}

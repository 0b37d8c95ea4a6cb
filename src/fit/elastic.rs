//! Elastic-slope (Young's modulus) estimation.
//!
//! Given:
//! - a curve
//! - a window size `n`
//! - a fit mode
//!
//! we fit the leading `n` samples with either:
//! - an affine model `stress = a·strain + b` (OLS via SVD), or
//! - a line through the origin `stress = k·strain` (closed form).
//!
//! Degenerate regressors are reported as `AnalysisError::DegenerateFit` instead of
//! a NaN/inf slope.

use nalgebra::DVector;
use tracing::debug;

use crate::domain::{Curve, FitMode, FitResult, FitWindow};
use crate::error::AnalysisError;
use crate::math::{affine_design, solve_least_squares};

/// Estimate the elastic slope of `curve` over its first `window` samples.
///
/// Returns `Ok(None)` when `mode` is `FitMode::None`; the window is not validated
/// in that case.
pub fn estimate(curve: &Curve, mode: FitMode, window: usize) -> Result<Option<FitResult>, AnalysisError> {
    let (window, slope, intercept) = match mode {
        FitMode::None => return Ok(None),
        FitMode::Affine => {
            let (window, strain, stress) = leading_samples(curve, window)?;
            let (a, b) = fit_affine(strain, stress)?;
            (window, a, Some(b))
        }
        FitMode::ZeroIntercept => {
            let (window, strain, stress) = leading_samples(curve, window)?;
            (window, fit_zero_intercept(strain, stress)?, None)
        }
    };

    debug!(
        curve = curve.label(),
        mode = mode.display_name(),
        window = window.size(),
        slope,
        "elastic fit"
    );

    Ok(Some(FitResult {
        mode,
        slope,
        intercept,
        window: window.size(),
    }))
}

fn leading_samples(curve: &Curve, n: usize) -> Result<(FitWindow, &[f64], &[f64]), AnalysisError> {
    let window = FitWindow::new(n)?;
    let (strain, stress) = window.resolve(curve)?;
    Ok((window, strain, stress))
}

/// Ordinary least squares `y ≈ a·x + b`. Returns `(a, b)`.
pub fn fit_affine(x: &[f64], y: &[f64]) -> Result<(f64, f64), AnalysisError> {
    let degenerate = |reason: &str| AnalysisError::DegenerateFit {
        mode: FitMode::Affine.display_name(),
        reason: reason.to_string(),
    };

    if x.len() < 2 {
        return Err(degenerate("fewer than two samples"));
    }

    // A constant regressor is rank-deficient; SVD would still return a
    // finite minimum-norm slope, so reject it up front.
    let first = x[0];
    if x.iter().all(|&v| v == first) {
        return Err(degenerate("all strain values are equal"));
    }

    let design = affine_design(x);
    let target = DVector::from_column_slice(y);
    let beta = solve_least_squares(&design, &target)
        .ok_or_else(|| degenerate("least squares system is ill-conditioned"))?;

    let (b, a) = (beta[0], beta[1]);
    if !a.is_finite() || !b.is_finite() {
        return Err(degenerate("non-finite coefficients"));
    }
    Ok((a, b))
}

/// Least squares through the origin: `k = Σ x·y / Σ x²`.
pub fn fit_zero_intercept(x: &[f64], y: &[f64]) -> Result<f64, AnalysisError> {
    let degenerate = |reason: &str| AnalysisError::DegenerateFit {
        mode: FitMode::ZeroIntercept.display_name(),
        reason: reason.to_string(),
    };

    let sxx: f64 = x.iter().map(|v| v * v).sum();
    if sxx == 0.0 {
        return Err(degenerate("sum of squared strain is zero"));
    }
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    let k = sxy / sxx;
    if !k.is_finite() {
        return Err(degenerate("non-finite slope"));
    }
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::error::ErrorKind;

    fn proportional(k: f64) -> Curve {
        Curve::from_pairs("p", [(0.0, 0.0), (0.01, 0.01 * k), (0.02, 0.02 * k), (0.05, 0.0)])
    }

    #[test]
    fn both_modes_recover_slope_of_line_through_origin() {
        let curve = proportional(150.0);
        for mode in [FitMode::Affine, FitMode::ZeroIntercept] {
            let fit = estimate(&curve, mode, 2).unwrap().unwrap();
            assert_relative_eq!(fit.slope, 150.0, max_relative = 1e-9);
            assert_eq!(fit.window, 2);
        }
    }

    #[test]
    fn two_samples_off_origin_still_agree() {
        // Both points on stress = 80·strain, neither at the origin.
        let curve = Curve::from_pairs("p", [(0.01, 0.8), (0.03, 2.4)]);
        let affine = estimate(&curve, FitMode::Affine, 2).unwrap().unwrap();
        let zero = estimate(&curve, FitMode::ZeroIntercept, 2).unwrap().unwrap();
        assert_relative_eq!(affine.slope, 80.0, max_relative = 1e-9);
        assert_relative_eq!(zero.slope, 80.0, max_relative = 1e-9);
        assert!(affine.intercept.unwrap().abs() < 1e-9);
        assert!(zero.intercept.is_none());
    }

    #[test]
    fn affine_recovers_intercept() {
        let curve = Curve::from_pairs("p", [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]);
        let fit = estimate(&curve, FitMode::Affine, 4).unwrap().unwrap();
        assert_relative_eq!(fit.slope, 2.0, max_relative = 1e-9);
        assert_relative_eq!(fit.intercept.unwrap(), 1.0, max_relative = 1e-9);
        assert_relative_eq!(fit.predict(10.0), 21.0, max_relative = 1e-9);
    }

    #[test]
    fn zero_intercept_matches_closed_form() {
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 3.0, 7.0];
        // (2 + 6 + 21) / (1 + 4 + 9)
        assert_relative_eq!(fit_zero_intercept(&x, &y).unwrap(), 29.0 / 14.0, epsilon = 1e-12);
    }

    #[test]
    fn equal_strains_are_degenerate_for_affine() {
        let curve = Curve::from_pairs("d", [(0.1, 1.0), (0.1, 2.0), (0.1, 3.0)]);
        let err = estimate(&curve, FitMode::Affine, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateFit);
    }

    #[test]
    fn all_zero_strain_is_degenerate_for_zero_intercept() {
        let curve = Curve::from_pairs("d", [(0.0, 1.0), (0.0, 2.0)]);
        let err = estimate(&curve, FitMode::ZeroIntercept, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateFit);
    }

    #[test]
    fn zero_slope_is_a_valid_fit() {
        let curve = Curve::from_pairs("flat", [(0.0, 0.0), (0.1, 0.0), (0.2, 0.0)]);
        let fit = estimate(&curve, FitMode::ZeroIntercept, 3).unwrap().unwrap();
        assert_eq!(fit.slope, 0.0);
    }

    #[test]
    fn disabled_mode_skips_window_validation() {
        let curve = Curve::from_pairs("c", [(0.0, 0.0)]);
        assert!(estimate(&curve, FitMode::None, 0).unwrap().is_none());
    }

    #[test]
    fn window_errors_surface_as_input_errors() {
        let curve = proportional(10.0);
        let err = estimate(&curve, FitMode::Affine, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        let err = estimate(&curve, FitMode::ZeroIntercept, 1).unwrap_err();
        assert!(matches!(err, AnalysisError::WindowTooSmall(1)));
    }
}

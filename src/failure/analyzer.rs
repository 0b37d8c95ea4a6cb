//! Locate the peak of a curve, bound the post-peak region and integrate toughness.
//!
//! Steps:
//! 1. `peak_index`: first occurrence of the maximum stress.
//! 2. `truncation_index`: where the post-peak decay falls to half the peak stress,
//!    according to the chosen `TruncationPolicy`.
//! 3. toughness: trapezoidal area under the curve over `[0, truncation_index)`.
//!
//! The two truncation policies agree whenever every sample above the half-peak
//! threshold sits contiguously right after the peak. They diverge when the tail
//! dips below the threshold and then climbs back above it: `Count` keeps counting
//! the later samples and overshoots, `FirstCrossing` stops at the first dip.

use tracing::debug;

use crate::domain::{Curve, FailureSummary, TruncationPolicy};
use crate::error::AnalysisError;
use crate::math::trapezoid;

/// Analyse `curve` and produce its `FailureSummary`.
pub fn analyze(curve: &Curve, policy: TruncationPolicy) -> Result<FailureSummary, AnalysisError> {
    let stress = curve.stress();
    let strain = curve.strain();

    let peak_index = peak_index(stress).ok_or(AnalysisError::EmptyCurve)?;
    let peak_stress = stress[peak_index];
    let peak_strain = strain[peak_index];

    let half = 0.5 * peak_stress;
    let raw_end = truncation_index(stress, peak_index, half, policy);
    let end = raw_end.min(curve.len());

    let toughness = if end <= 1 {
        debug!(curve = curve.label(), end, "empty integration range, toughness is zero");
        0.0
    } else {
        trapezoid(&strain[..end], &stress[..end])
    };

    debug!(
        curve = curve.label(),
        peak_index,
        peak_stress,
        truncation_index = end,
        policy = policy.display_name(),
        toughness,
        "failure analysis"
    );

    Ok(FailureSummary {
        peak_index,
        peak_stress,
        peak_strain,
        truncation_index: end,
        policy,
        toughness,
    })
}

/// Index of the first maximum of `values` (stable argmax).
///
/// NaN entries never win. Returns `None` for an empty slice.
pub fn peak_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some(b) if v <= values[b] => {}
            _ => best = Some(i),
        }
    }
    best.or_else(|| (!values.is_empty()).then_some(0))
}

/// Exclusive end of the toughness integration range, before clamping.
pub fn truncation_index(stress: &[f64], peak: usize, half: f64, policy: TruncationPolicy) -> usize {
    let tail = stress.get(peak..).unwrap_or(&[]);
    match policy {
        TruncationPolicy::Count => peak + tail.iter().filter(|&&s| s > half).count(),
        TruncationPolicy::FirstCrossing => tail
            .iter()
            .position(|&s| s <= half)
            .map_or(stress.len(), |offset| peak + offset),
    }
}

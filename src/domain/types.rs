//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during analysis
//! - exported to JSON/CSV
//! - reloaded later for re-rendering the report

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// A stress–strain curve: ordered `(strain, stress)` samples.
///
/// Strain is expected to be non-decreasing, but this is not enforced; callers can
/// check `is_strain_monotonic` and decide whether to warn.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    label: String,
    strain: Vec<f64>,
    stress: Vec<f64>,
}

impl Curve {
    /// Build a curve from `(strain, stress)` pairs.
    pub fn from_pairs(label: impl Into<String>, pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (strain, stress) = pairs.into_iter().unzip();
        Self {
            label: label.into(),
            strain,
            stress,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.strain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strain.is_empty()
    }

    pub fn strain(&self) -> &[f64] {
        &self.strain
    }

    pub fn stress(&self) -> &[f64] {
        &self.stress
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.strain.iter().copied().zip(self.stress.iter().copied())
    }

    pub fn is_strain_monotonic(&self) -> bool {
        self.strain.windows(2).all(|w| w[1] >= w[0])
    }
}

/// The leading `n` samples of a curve used for the elastic fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitWindow(usize);

impl FitWindow {
    pub fn new(n: usize) -> Result<Self, AnalysisError> {
        if n < 2 {
            return Err(AnalysisError::WindowTooSmall(n));
        }
        Ok(Self(n))
    }

    pub fn size(self) -> usize {
        self.0
    }

    /// Borrow the windowed `(strain, stress)` slices of `curve`.
    pub fn resolve(self, curve: &Curve) -> Result<(&[f64], &[f64]), AnalysisError> {
        if self.0 > curve.len() {
            return Err(AnalysisError::InsufficientRows {
                requested: self.0,
                available: curve.len(),
            });
        }
        Ok((&curve.strain()[..self.0], &curve.stress()[..self.0]))
    }
}

/// Elastic-slope model selector.
///
/// On the command line the modes keep their numeric codes (`-t 0|1|2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// No fit: plot-only run.
    #[value(name = "0", alias = "none")]
    None,
    /// `stress ≈ a·strain + b` (ordinary least squares).
    #[value(name = "1", alias = "affine")]
    Affine,
    /// `stress ≈ k·strain` (least squares through the origin).
    #[value(name = "2", alias = "zero-intercept")]
    ZeroIntercept,
}

impl FitMode {
    pub fn code(self) -> u8 {
        match self {
            FitMode::None => 0,
            FitMode::Affine => 1,
            FitMode::ZeroIntercept => 2,
        }
    }

    pub fn is_enabled(self) -> bool {
        self != FitMode::None
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FitMode::None => "none",
            FitMode::Affine => "affine",
            FitMode::ZeroIntercept => "zero-intercept",
        }
    }
}

/// Outcome of an elastic fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub mode: FitMode,
    /// Young's modulus estimate.
    pub slope: f64,
    /// Only estimated by the affine model.
    pub intercept: Option<f64>,
    /// Number of leading samples used.
    pub window: usize,
}

impl FitResult {
    pub fn predict(&self, strain: f64) -> f64 {
        self.slope * strain + self.intercept.unwrap_or(0.0)
    }
}

/// How the end of the toughness integration range is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TruncationPolicy {
    /// `jd = peak_index + count(stress[peak_index..] > half_peak)`.
    ///
    /// Only lands on the crossing when the samples above the threshold are
    /// contiguous from the peak.
    Count,
    /// `jd` = first index at or after the peak with `stress <= half_peak`.
    FirstCrossing,
}

impl TruncationPolicy {
    pub fn display_name(self) -> &'static str {
        match self {
            TruncationPolicy::Count => "count",
            TruncationPolicy::FirstCrossing => "first-crossing",
        }
    }
}

/// Peak, truncation point and toughness of one curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureSummary {
    pub peak_index: usize,
    /// Ultimate strength.
    pub peak_stress: f64,
    /// Fracture strain (strain at the peak).
    pub peak_strain: f64,
    /// Exclusive end of the integration range, clamped to the curve length.
    pub truncation_index: usize,
    pub policy: TruncationPolicy,
    pub toughness: f64,
}

impl FailureSummary {
    /// True when fewer than two samples were integrated (toughness is 0 by definition).
    pub fn is_empty_range(&self) -> bool {
        self.truncation_index <= 1
    }
}

/// Layout of the input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `.csv` extension means comma separated, anything else whitespace.
    Auto,
    Whitespace,
    Csv,
}

impl InputFormat {
    pub fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_csv = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
                if is_csv { InputFormat::Csv } else { InputFormat::Whitespace }
            }
            other => other,
        }
    }
}

/// 1-indexed column selectors for strain and stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub strain: usize,
    pub stress: usize,
}

impl Columns {
    pub fn new(strain: usize, stress: usize) -> Result<Self, AnalysisError> {
        for col in [strain, stress] {
            if col == 0 {
                return Err(AnalysisError::InvalidColumn(col));
            }
        }
        Ok(Self { strain, stress })
    }
}

/// Everything the per-curve analysis needs. Passed explicitly, never global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub fit_mode: FitMode,
    /// Requested fit window size; only validated when fitting is enabled.
    pub fit_window: usize,
    pub truncation: TruncationPolicy,
    pub columns: Columns,
    pub format: InputFormat,
}

/// A dataset to be loaded and analysed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveSource {
    pub path: PathBuf,
}

impl CurveSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name used to label the curve in reports.
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// One curve, or a primary curve plus a comparison curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Single(CurveSource),
    Comparative(CurveSource, CurveSource),
}

impl AnalysisRequest {
    pub fn from_paths(primary: PathBuf, comparison: Option<PathBuf>) -> Self {
        match comparison {
            Some(second) => AnalysisRequest::Comparative(CurveSource::new(primary), CurveSource::new(second)),
            None => AnalysisRequest::Single(CurveSource::new(primary)),
        }
    }

    pub fn sources(&self) -> Vec<&CurveSource> {
        match self {
            AnalysisRequest::Single(a) => vec![a],
            AnalysisRequest::Comparative(a, b) => vec![a, b],
        }
    }

    pub fn primary(&self) -> &CurveSource {
        match self {
            AnalysisRequest::Single(a) | AnalysisRequest::Comparative(a, _) => a,
        }
    }

    pub fn comparison(&self) -> Option<&CurveSource> {
        match self {
            AnalysisRequest::Single(_) => None,
            AnalysisRequest::Comparative(_, b) => Some(b),
        }
    }
}

/// A full run's configuration as understood by the application.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub request: AnalysisRequest,
    pub analysis: AnalysisConfig,

    pub title: String,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub write_results: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> Curve {
        Curve::from_pairs("c", [(0.0, 0.0), (0.1, 1.0), (0.2, 2.0)])
    }

    #[test]
    fn fit_window_rejects_fewer_than_two_samples() {
        assert!(matches!(FitWindow::new(1), Err(AnalysisError::WindowTooSmall(1))));
        assert!(matches!(FitWindow::new(0), Err(AnalysisError::WindowTooSmall(0))));
        assert_eq!(FitWindow::new(2).unwrap().size(), 2);
    }

    #[test]
    fn fit_window_larger_than_curve_is_an_input_error() {
        let err = FitWindow::new(4).unwrap().resolve(&curve()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientRows { requested: 4, available: 3 }
        ));
    }

    #[test]
    fn fit_window_borrows_leading_samples() {
        let c = curve();
        let (x, y) = FitWindow::new(2).unwrap().resolve(&c).unwrap();
        assert_eq!(x, &[0.0, 0.1]);
        assert_eq!(y, &[0.0, 1.0]);
    }

    #[test]
    fn input_format_auto_uses_extension() {
        assert_eq!(InputFormat::Auto.resolve(Path::new("a/b.CSV")), InputFormat::Csv);
        assert_eq!(InputFormat::Auto.resolve(Path::new("a/b.dat")), InputFormat::Whitespace);
        assert_eq!(InputFormat::Whitespace.resolve(Path::new("b.csv")), InputFormat::Whitespace);
    }

    #[test]
    fn columns_are_one_indexed() {
        assert!(Columns::new(0, 3).is_err());
        assert!(Columns::new(2, 3).is_ok());
    }

    #[test]
    fn request_sources_follow_variant() {
        let single = AnalysisRequest::from_paths("a.dat".into(), None);
        assert_eq!(single.sources().len(), 1);
        assert!(single.comparison().is_none());

        let pair = AnalysisRequest::from_paths("a.dat".into(), Some("dir/b.dat".into()));
        assert_eq!(pair.sources().len(), 2);
        assert_eq!(pair.comparison().unwrap().label(), "b.dat");
    }

    #[test]
    fn non_monotonic_strain_is_detected() {
        assert!(curve().is_strain_monotonic());
        let c = Curve::from_pairs("c", [(0.0, 0.0), (0.2, 1.0), (0.1, 2.0)]);
        assert!(!c.is_strain_monotonic());
    }
}

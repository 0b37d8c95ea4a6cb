//! Error types.
//!
//! Two layers:
//! - `AnalysisError` is produced by the per-curve library code (ingest, fitting,
//!   failure analysis). It is kept per curve so that a comparison run can report
//!   one curve even when the other one fails.
//! - `AppError` is the application boundary: a message plus the process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for missing/unreadable files and invalid arguments.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for datasets that contain no usable samples.
pub const EXIT_NO_DATA: u8 = 3;
/// Exit code for numerical failures (degenerate fits).
pub const EXIT_NUMERIC: u8 = 4;

/// Coarse classification of an `AnalysisError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dataset or the requested window cannot be used.
    Input,
    /// The regressor has no spread (or the slope is not finite).
    DegenerateFit,
}

/// A failure local to the analysis of one curve.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no usable samples in '{}'", path.display())]
    NoSamples { path: PathBuf },

    #[error("curve has no samples")]
    EmptyCurve,

    #[error("column selectors are 1-indexed, got {0}")]
    InvalidColumn(usize),

    #[error("fit window must contain at least 2 samples, got {0}")]
    WindowTooSmall(usize),

    #[error("fit window of {requested} samples exceeds the {available} available")]
    InsufficientRows { requested: usize, available: usize },

    #[error("degenerate {mode} fit: {reason}")]
    DegenerateFit { mode: &'static str, reason: String },
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::DegenerateFit { .. } => ErrorKind::DegenerateFit,
            _ => ErrorKind::Input,
        }
    }

    /// Exit code used when this error terminates the run.
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::NoSamples { .. } | AnalysisError::EmptyCurve => EXIT_NO_DATA,
            AnalysisError::DegenerateFit { .. } => EXIT_NUMERIC,
            _ => EXIT_INPUT,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_fit_is_its_own_kind() {
        let err = AnalysisError::DegenerateFit {
            mode: "affine",
            reason: "all strain values are equal".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::DegenerateFit);
        assert_eq!(err.exit_code(), EXIT_NUMERIC);

        let err = AnalysisError::InsufficientRows { requested: 10, available: 4 };
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn app_error_keeps_exit_code_and_message() {
        let app: AppError = AnalysisError::EmptyCurve.into();
        assert_eq!(app.exit_code(), EXIT_NO_DATA);
        assert_eq!(app.to_string(), "curve has no samples");
    }
}

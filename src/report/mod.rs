//! Reporting: the fixed-precision results block and the run summary.
//!
//! We keep formatting code in one place so:
//! - the numeric code stays clean and testable
//! - output changes are localized (golden tests live next to the formatter)

use serde::{Deserialize, Serialize};

use crate::domain::{FailureSummary, FitResult};

pub mod format;

pub use format::*;

/// The four reported values of one curve; `None` when it could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveMetrics {
    pub modulus: Option<f64>,
    pub strength: Option<f64>,
    pub toughness: Option<f64>,
    pub fracture_strain: Option<f64>,
}

impl CurveMetrics {
    pub fn from_parts(fit: Option<&FitResult>, failure: Option<&FailureSummary>) -> Self {
        Self {
            modulus: fit.map(|f| f.slope),
            strength: failure.map(|f| f.peak_stress),
            toughness: failure.map(|f| f.toughness),
            fracture_strain: failure.map(|f| f.peak_strain),
        }
    }
}

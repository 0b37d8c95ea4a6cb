//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the input curve and its fit window (`Curve`, `FitWindow`)
//! - configuration enums (`FitMode`, `TruncationPolicy`, `InputFormat`)
//! - analysis outputs (`FitResult`, `FailureSummary`)
//! - the request shape (`AnalysisRequest`)

pub mod types;

pub use types::*;

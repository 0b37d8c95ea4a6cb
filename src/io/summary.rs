//! Read/write analysis JSON files.
//!
//! The analysis JSON is the "portable" representation of a run:
//! - the command line and configuration it was produced with
//! - per-curve fit and failure results (or the error that prevented them)
//!
//! `tensile show` re-renders the results block from it without the raw data.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::pipeline::{CurveOutcome, RunOutput};
use crate::domain::{AnalysisConfig, FailureSummary, FitResult};
use crate::error::{AppError, EXIT_INPUT};
use crate::report::CurveMetrics;

/// A saved analysis (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    /// argv of the producing run, so it can be repeated.
    #[serde(default)]
    pub command: Vec<String>,
    pub config: AnalysisConfig,
    pub curves: Vec<CurveRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveRecord {
    pub label: String,
    pub path: PathBuf,
    pub n_points: Option<usize>,
    pub fit: Option<FitResult>,
    pub failure: Option<FailureSummary>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl CurveRecord {
    pub fn from_outcome(outcome: &CurveOutcome) -> Self {
        Self {
            label: outcome.label(),
            path: outcome.source.path.clone(),
            n_points: outcome.curve().map(|c| c.len()),
            fit: outcome.fit().cloned(),
            failure: outcome.failure().cloned(),
            errors: outcome.errors().iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn metrics(&self) -> CurveMetrics {
        CurveMetrics::from_parts(self.fit.as_ref(), self.failure.as_ref())
    }
}

impl AnalysisFile {
    pub fn from_run(run: &RunOutput, config: &AnalysisConfig, command: &[String]) -> Self {
        Self {
            tool: "tensile".to_string(),
            generated: Utc::now(),
            command: command.to_vec(),
            config: config.clone(),
            curves: run.outcomes.iter().map(CurveRecord::from_outcome).collect(),
        }
    }
}

/// Write an analysis JSON file.
pub fn write_analysis_json(
    path: &Path,
    run: &RunOutput,
    config: &AnalysisConfig,
    command: &[String],
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create analysis JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &AnalysisFile::from_run(run, config, command))
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write analysis JSON: {e}")))?;

    Ok(())
}

/// Read an analysis JSON file.
pub fn read_analysis_json(path: &Path) -> Result<AnalysisFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open analysis JSON '{}': {e}", path.display())))?;
    let analysis: AnalysisFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to parse analysis JSON: {e}")))?;
    Ok(analysis)
}

//! Shared analysis pipeline.
//!
//! Every curve goes through the same steps, whether it is the only curve or one
//! side of a comparison:
//! load -> elastic fit -> failure analysis
//!
//! Each step's error stays attached to its curve, so a broken comparison file
//! never hides the results of the primary one. An input error in the fit window
//! is fatal for its curve: the failure analysis does not run.

use tracing::{info, warn};

use crate::domain::{AnalysisConfig, AnalysisRequest, Curve, CurveSource, FailureSummary, FitResult};
use crate::error::{AnalysisError, ErrorKind};
use crate::io::ingest::{IngestedCurve, load_curve};
use crate::report::CurveMetrics;

/// Results for a curve that was loaded successfully.
#[derive(Debug)]
pub struct CurveAnalysis {
    pub ingest: IngestedCurve,
    /// `None` when fitting is disabled.
    pub fit: Option<Result<FitResult, AnalysisError>>,
    pub failure: Result<FailureSummary, AnalysisError>,
}

/// Everything known about one requested curve.
#[derive(Debug)]
pub struct CurveOutcome {
    pub source: CurveSource,
    pub result: Result<CurveAnalysis, AnalysisError>,
}

impl CurveOutcome {
    pub fn label(&self) -> String {
        self.source.label()
    }

    pub fn curve(&self) -> Option<&Curve> {
        self.result.as_ref().ok().map(|a| &a.ingest.curve)
    }

    pub fn fit(&self) -> Option<&FitResult> {
        self.result.as_ref().ok()?.fit.as_ref()?.as_ref().ok()
    }

    pub fn failure(&self) -> Option<&FailureSummary> {
        self.result.as_ref().ok()?.failure.as_ref().ok()
    }

    /// All errors attached to this curve, load errors first.
    pub fn errors(&self) -> Vec<&AnalysisError> {
        match &self.result {
            Err(e) => vec![e],
            Ok(a) => {
                let mut out = Vec::new();
                if let Some(Err(e)) = &a.fit {
                    out.push(e);
                }
                if let Err(e) = &a.failure {
                    out.push(e);
                }
                out
            }
        }
    }

    pub fn metrics(&self) -> CurveMetrics {
        CurveMetrics::from_parts(self.fit(), self.failure())
    }
}

/// All computed outputs of a single `tensile analyze` run.
#[derive(Debug)]
pub struct RunOutput {
    pub request: AnalysisRequest,
    pub outcomes: Vec<CurveOutcome>,
}

impl RunOutput {
    pub fn primary(&self) -> &CurveOutcome {
        &self.outcomes[0]
    }

    pub fn is_comparative(&self) -> bool {
        self.outcomes.len() > 1
    }

    pub fn first_error(&self) -> Option<&AnalysisError> {
        self.outcomes.iter().flat_map(CurveOutcome::errors).next()
    }
}

/// Load and analyse a single curve.
pub fn analyze_curve(source: &CurveSource, config: &AnalysisConfig) -> CurveOutcome {
    let result = load_curve(source, config).and_then(|ingest| analyze_loaded(ingest, config));

    if let Err(e) = &result {
        warn!(curve = %source.label(), "{e}");
    }

    CurveOutcome {
        source: source.clone(),
        result,
    }
}

fn analyze_loaded(ingest: IngestedCurve, config: &AnalysisConfig) -> Result<CurveAnalysis, AnalysisError> {
    let curve = &ingest.curve;

    let fit = match crate::fit::estimate(curve, config.fit_mode, config.fit_window) {
        Err(e) if e.kind() == ErrorKind::Input => return Err(e),
        other => other.transpose(),
    };
    let failure = crate::failure::analyze(curve, config.truncation);

    match &fit {
        Some(Ok(f)) => info!(curve = curve.label(), modulus = f.slope, "elastic slope"),
        Some(Err(e)) => warn!(curve = curve.label(), "{e}"),
        None => {}
    }
    if let Err(e) = &failure {
        warn!(curve = curve.label(), "{e}");
    }

    Ok(CurveAnalysis { ingest, fit, failure })
}

/// Execute the analysis for every curve in `request`.
pub fn run_analysis(request: &AnalysisRequest, config: &AnalysisConfig) -> RunOutput {
    let outcomes = request
        .sources()
        .into_iter()
        .map(|source| analyze_curve(source, config))
        .collect();

    RunOutput {
        request: request.clone(),
        outcomes,
    }
}

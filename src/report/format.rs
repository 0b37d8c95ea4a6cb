//! Formatted terminal/file output.
//!
//! The results block keeps the exact layout downstream scripts grep for, including
//! the trailing space on every line.

use crate::app::pipeline::{CurveOutcome, RunOutput};
use crate::domain::{AnalysisConfig, FitMode};
use crate::report::CurveMetrics;

const NOT_AVAILABLE: &str = "n/a";

/// Format the results block for one curve, or two curves side by side.
///
/// Returns `None` for an empty slice. Only the first two entries are used.
pub fn format_results_block(metrics: &[CurveMetrics]) -> Option<String> {
    let mut out = String::from("   Data analysis \n");

    match metrics {
        [] => return None,
        [m] => {
            out.push_str(&format!("Young's  modulus: {} GPa \n", fmt_value(m.modulus, 0, 1)));
            out.push_str(&format!("Material strength:  {} GPa \n", fmt_value(m.strength, 0, 1)));
            out.push_str(&format!("Material toughness: {} \n", fmt_value(m.toughness, 0, 3)));
            out.push_str(&format!("Fracture strain:    {} \n", fmt_value(m.fracture_strain, 0, 3)));
        }
        [a, b, ..] => {
            out.push_str(&format!(
                "Young's  modulus: {}|{} GPa \n",
                fmt_value(a.modulus, 5, 1),
                fmt_value(b.modulus, 5, 1)
            ));
            out.push_str(&format!(
                "Material strength:  {}|{} GPa \n",
                fmt_value(a.strength, 4, 1),
                fmt_value(b.strength, 4, 1)
            ));
            out.push_str(&format!(
                "Material toughness: {}|{} \n",
                fmt_value(a.toughness, 5, 3),
                fmt_value(b.toughness, 5, 3)
            ));
            out.push_str(&format!(
                "Fracture strain:    {}|{} \n",
                fmt_value(a.fracture_strain, 5, 3),
                fmt_value(b.fracture_strain, 5, 3)
            ));
        }
    }

    Some(out)
}

/// Results block for a run, or `None` when fitting is disabled.
pub fn format_run_results(run: &RunOutput, config: &AnalysisConfig) -> Option<String> {
    if !config.fit_mode.is_enabled() {
        return None;
    }
    let metrics: Vec<CurveMetrics> = run.outcomes.iter().map(CurveOutcome::metrics).collect();
    format_results_block(&metrics)
}

/// Format the run summary (datasets + fit + failure diagnostics).
pub fn format_run_summary(run: &RunOutput, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== tensile - stress-strain analysis ===\n");
    out.push_str(&format!(
        "Columns: strain={} stress={} | truncation: {}\n",
        config.columns.strain,
        config.columns.stress,
        config.truncation.display_name()
    ));
    match config.fit_mode {
        FitMode::None => out.push_str("Fit: disabled (-t 0)\n"),
        mode => out.push_str(&format!(
            "Fit: {} (-t {}) over the first {} samples\n",
            mode.display_name(),
            mode.code(),
            config.fit_window
        )),
    }

    for (i, outcome) in run.outcomes.iter().enumerate() {
        out.push('\n');
        out.push_str(&format_curve_summary(i + 1, outcome));
    }

    out
}

fn format_curve_summary(index: usize, outcome: &CurveOutcome) -> String {
    let mut out = String::new();

    let analysis = match &outcome.result {
        Ok(a) => a,
        Err(e) => {
            out.push_str(&format!("Curve {index}: {} | error: {e}\n", outcome.label()));
            return out;
        }
    };

    let stats = &analysis.ingest.stats;
    out.push_str(&format!(
        "Curve {index}: {} | n={} | strain=[{:.4}, {:.4}] | stress=[{:.3}, {:.3}]",
        outcome.label(),
        stats.n_points,
        stats.strain_min,
        stats.strain_max,
        stats.stress_min,
        stats.stress_max
    ));
    if !analysis.ingest.row_errors.is_empty() {
        out.push_str(&format!(" | skipped rows={}", analysis.ingest.row_errors.len()));
    }
    out.push('\n');

    match &analysis.fit {
        None => {}
        Some(Ok(fit)) => {
            let intercept = fit.intercept.map(|b| format!("{b:.6}")).unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  modulus: {:.6} | intercept: {intercept} | window: {}\n",
                fit.slope, fit.window
            ));
        }
        Some(Err(e)) => out.push_str(&format!("  modulus: {e}\n")),
    }

    match &analysis.failure {
        Ok(f) => {
            out.push_str(&format!(
                "  peak: index {} | stress {:.4} | strain {:.4}\n",
                f.peak_index, f.peak_stress, f.peak_strain
            ));
            if f.is_empty_range() {
                out.push_str(&format!(
                    "  toughness: 0 (empty integration range, end index {})\n",
                    f.truncation_index
                ));
            } else {
                out.push_str(&format!(
                    "  toughness: {:.6} over samples [0, {})\n",
                    f.toughness, f.truncation_index
                ));
            }
        }
        Err(e) => out.push_str(&format!("  failure analysis: {e}\n")),
    }

    out
}

fn fmt_value(v: Option<f64>, width: usize, precision: usize) -> String {
    match v {
        Some(v) => format!("{v:>width$.precision$}"),
        None => format!("{:>width$}", NOT_AVAILABLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(modulus: Option<f64>) -> CurveMetrics {
        CurveMetrics {
            modulus,
            strength: Some(45.678),
            toughness: Some(3.14159),
            fracture_strain: Some(0.1234),
        }
    }

    #[test]
    fn single_block_golden() {
        let txt = format_results_block(&[metrics(Some(1012.345))]).unwrap();
        let expected = concat!(
            "   Data analysis \n",
            "Young's  modulus: 1012.3 GPa \n",
            "Material strength:  45.7 GPa \n",
            "Material toughness: 3.142 \n",
            "Fracture strain:    0.123 \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn comparison_block_golden() {
        let second = CurveMetrics {
            modulus: Some(98.76),
            strength: Some(7.0),
            toughness: Some(0.5),
            fracture_strain: Some(0.05),
        };
        let txt = format_results_block(&[metrics(Some(180.04)), second]).unwrap();
        let expected = concat!(
            "   Data analysis \n",
            "Young's  modulus: 180.0| 98.8 GPa \n",
            "Material strength:  45.7| 7.0 GPa \n",
            "Material toughness: 3.142|0.500 \n",
            "Fracture strain:    0.123|0.050 \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn missing_values_render_as_not_available() {
        let txt = format_results_block(&[metrics(None), CurveMetrics::default()]).unwrap();
        assert!(txt.contains("Young's  modulus:   n/a|  n/a GPa \n"));
        assert!(txt.contains("Material strength:  45.7| n/a GPa \n"));

        let single = format_results_block(&[metrics(None)]).unwrap();
        assert!(single.contains("Young's  modulus: n/a GPa \n"));
    }

    #[test]
    fn empty_metrics_have_no_block() {
        assert!(format_results_block(&[]).is_none());
    }

    #[test]
    fn run_summary_and_gated_results() {
        use crate::app::pipeline::run_analysis;
        use crate::domain::{AnalysisRequest, Columns, InputFormat, TruncationPolicy};

        let path = std::env::temp_dir().join(format!("tensile_format_{}.dat", std::process::id()));
        std::fs::write(&path, "0.0 0.0\n1.0 2.0\n2.0 4.0\n3.0 1.0\n").unwrap();

        let mut config = AnalysisConfig {
            fit_mode: FitMode::ZeroIntercept,
            fit_window: 2,
            truncation: TruncationPolicy::FirstCrossing,
            columns: Columns::new(1, 2).unwrap(),
            format: InputFormat::Whitespace,
        };
        let request = AnalysisRequest::from_paths(path.clone(), None);
        let run = run_analysis(&request, &config);

        let summary = format_run_summary(&run, &config);
        assert!(summary.starts_with("=== tensile - stress-strain analysis ===\n"));
        assert!(summary.contains("truncation: first-crossing"));
        assert!(summary.contains("Fit: zero-intercept (-t 2) over the first 2 samples"));
        assert!(summary.contains("modulus: 2.000000 | intercept: - | window: 2"));
        assert!(summary.contains("peak: index 2 | stress 4.0000 | strain 2.0000"));

        let block = format_run_results(&run, &config).unwrap();
        assert!(block.contains("Young's  modulus: 2.0 GPa \n"));

        config.fit_mode = FitMode::None;
        let run = run_analysis(&request, &config);
        std::fs::remove_file(&path).ok();
        assert!(format_run_results(&run, &config).is_none());
        assert!(format_run_summary(&run, &config).contains("Fit: disabled (-t 0)"));
    }
}

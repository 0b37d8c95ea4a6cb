//! Results file and per-sample CSV export.
//!
//! The results file holds the same text block that is printed to stdout. Its name
//! encodes the inputs so runs with different columns/datasets do not overwrite
//! each other:
//!
//! ```text
//! <file>_<j1>_<j2>[_<basename(file2)>][_<trunc(modulus)>]_fitting_results.txt
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::{Columns, FitResult};
use crate::error::{AppError, EXIT_INPUT};

/// Derive the results file path from the run inputs.
///
/// The modulus tag is the primary curve's modulus truncated toward zero; it is
/// left out when there is no primary fit.
pub fn results_path(primary: &Path, columns: Columns, comparison: Option<&Path>, fit: Option<&FitResult>) -> PathBuf {
    let mut name: OsString = primary.as_os_str().to_owned();
    name.push(format!("_{}_{}", columns.strain, columns.stress));

    if let Some(file_name) = comparison.and_then(Path::file_name) {
        name.push("_");
        name.push(file_name);
    }
    if let Some(fit) = fit {
        name.push(format!("_{}", fit.slope.trunc() as i64));
    }
    name.push("_fitting_results.txt");

    PathBuf::from(name)
}

/// Write the results block to `path`.
pub fn write_results_text(path: &Path, text: &str) -> Result<(), AppError> {
    fs::write(path, text)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write results file '{}': {e}", path.display())))
}

#[derive(Debug, Serialize)]
struct SampleRow<'a> {
    curve: &'a str,
    index: usize,
    strain: f64,
    stress: f64,
    fit_stress: Option<f64>,
    in_toughness_range: bool,
}

/// Write every loaded sample, with its fitted value, to a CSV file.
pub fn write_samples_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for outcome in &run.outcomes {
        let Some(curve) = outcome.curve() else { continue };
        let label = outcome.label();
        let fit = outcome.fit();
        let end = outcome.failure().map_or(0, |f| f.truncation_index);

        for (index, (strain, stress)) in curve.samples().enumerate() {
            let row = SampleRow {
                curve: &label,
                index,
                strain,
                stress,
                fit_stress: fit.map(|f| f.predict(strain)),
                in_toughness_range: index < end && end > 1,
            };
            writer
                .serialize(row)
                .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

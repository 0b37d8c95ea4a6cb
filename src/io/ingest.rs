//! Dataset ingest and normalization.
//!
//! This module is responsible for turning a numeric table (whitespace-delimited
//! or CSV) into a clean `Curve` of `(strain, stress)` samples.
//!
//! Design goals:
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (same file, same curve)
//! - **Separation of concerns**: no fitting logic here

use std::fs::{self, File};
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{AnalysisConfig, Columns, Curve, CurveSource, InputFormat};
use crate::error::AnalysisError;

/// Summary stats about the samples actually loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub strain_min: f64,
    pub strain_max: f64,
    pub stress_min: f64,
    pub stress_max: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the curve + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedCurve {
    pub curve: Curve,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedCurve {
    pub fn rows_used(&self) -> usize {
        self.curve.len()
    }
}

/// Load a curve described by `source` using the column/format settings in `config`.
pub fn load_curve(source: &CurveSource, config: &AnalysisConfig) -> Result<IngestedCurve, AnalysisError> {
    let path = source.path.as_path();
    let (samples, row_errors, rows_read) = match config.format.resolve(path) {
        InputFormat::Csv => read_csv(path, config.columns)?,
        _ => read_whitespace(path, config.columns)?,
    };

    for e in &row_errors {
        warn!(file = %path.display(), line = e.line, "skipped row: {}", e.message);
    }

    let curve = Curve::from_pairs(source.label(), samples);
    let stats = compute_stats(&curve).ok_or_else(|| AnalysisError::NoSamples {
        path: path.to_path_buf(),
    })?;

    if !curve.is_strain_monotonic() {
        warn!(file = %path.display(), "strain column is not monotonically non-decreasing");
    }

    debug!(
        file = %path.display(),
        rows_read,
        rows_used = curve.len(),
        skipped = row_errors.len(),
        "dataset loaded"
    );

    Ok(IngestedCurve {
        curve,
        stats,
        row_errors,
        rows_read,
    })
}

type Parsed = (Vec<(f64, f64)>, Vec<RowError>, usize);

fn read_whitespace(path: &Path, columns: Columns) -> Result<Parsed, AnalysisError> {
    let text = fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut samples = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows_read += 1;

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match parse_row(&fields, columns) {
            Ok(sample) => samples.push(sample),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok((samples, row_errors, rows_read))
}

fn read_csv(path: &Path, columns: Columns) -> Result<Parsed, AnalysisError> {
    let file = File::open(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(file);

    let mut samples = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                rows_read += 1;
                row_errors.push(RowError {
                    line: e.position().map_or(idx + 1, |p| p.line() as usize),
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };
        let line = record.position().map_or(idx + 1, |p| p.line() as usize);

        if record.iter().all(str::is_empty) {
            continue;
        }

        // A leading row with no numeric fields is a header, not a bad sample.
        if idx == 0 && is_header(&record) {
            debug!(file = %path.display(), "skipping CSV header row");
            continue;
        }
        rows_read += 1;

        let fields: Vec<&str> = record.iter().collect();
        match parse_row(&fields, columns) {
            Ok(sample) => samples.push(sample),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok((samples, row_errors, rows_read))
}

fn is_header(record: &StringRecord) -> bool {
    record.iter().all(|f| f.parse::<f64>().is_err())
}

fn parse_row(fields: &[&str], columns: Columns) -> Result<(f64, f64), String> {
    let strain = parse_column(fields, columns.strain, "strain")?;
    let stress = parse_column(fields, columns.stress, "stress")?;
    Ok((strain, stress))
}

fn parse_column(fields: &[&str], column: usize, name: &str) -> Result<f64, String> {
    let raw = column
        .checked_sub(1)
        .and_then(|i| fields.get(i))
        .ok_or_else(|| format!("missing {name} column {column} (row has {} fields)", fields.len()))?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("invalid {name} value '{raw}' in column {column}"))?;
    if !value.is_finite() {
        return Err(format!("non-finite {name} value in column {column}"));
    }
    Ok(value)
}

fn compute_stats(curve: &Curve) -> Option<DatasetStats> {
    let mut strain_min = f64::INFINITY;
    let mut strain_max = f64::NEG_INFINITY;
    let mut stress_min = f64::INFINITY;
    let mut stress_max = f64::NEG_INFINITY;

    for (strain, stress) in curve.samples() {
        strain_min = strain_min.min(strain);
        strain_max = strain_max.max(strain);
        stress_min = stress_min.min(stress);
        stress_max = stress_max.max(stress);
    }

    if !strain_min.is_finite() || !strain_max.is_finite() || !stress_min.is_finite() || !stress_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_points: curve.len(),
        strain_min,
        strain_max,
        stress_min,
        stress_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::{FitMode, TruncationPolicy};

    fn config(format: InputFormat) -> AnalysisConfig {
        AnalysisConfig {
            fit_mode: FitMode::ZeroIntercept,
            fit_window: 2,
            truncation: TruncationPolicy::Count,
            columns: Columns::new(2, 3).unwrap(),
            format,
        }
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tensile_ingest_{}_{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn whitespace_table_skips_comments_and_bad_rows() {
        let path = write_temp(
            "ws.dat",
            "# step strain stress\n\
             1 0.00 0.0\n\
             \n\
             2\t0.01   1.5\n\
             3 0.02 oops\n\
             4 0.03\n\
             5 0.04 3.0 extra\n",
        );
        let ingest = load_curve(&CurveSource::new(&path), &config(InputFormat::Auto)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(ingest.curve.strain(), &[0.0, 0.01, 0.04]);
        assert_eq!(ingest.curve.stress(), &[0.0, 1.5, 3.0]);
        assert_eq!(ingest.rows_read, 5);
        assert_eq!(ingest.rows_used(), 3);
        let lines: Vec<usize> = ingest.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![5, 6]);
        assert_eq!(ingest.stats.stress_max, 3.0);
        assert_eq!(ingest.curve.label(), path.file_name().unwrap().to_string_lossy());
    }

    #[test]
    fn csv_table_with_header() {
        let path = write_temp("table.csv", "step,strain,stress\n1, 0.0, 0.0\n2, 0.5, 2.0\n");
        let ingest = load_curve(&CurveSource::new(&path), &config(InputFormat::Auto)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(ingest.curve.strain(), &[0.0, 0.5]);
        assert_eq!(ingest.curve.stress(), &[0.0, 2.0]);
        assert!(ingest.row_errors.is_empty());
        assert_eq!(ingest.rows_read, 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let source = CurveSource::new("/definitely/not/here.dat");
        let err = load_curve(&source, &config(InputFormat::Whitespace)).unwrap_err();
        assert!(matches!(err, AnalysisError::Read { .. }));
    }

    #[test]
    fn file_without_usable_rows_is_rejected() {
        let path = write_temp("empty.dat", "# only a comment\n1 2\n");
        let err = load_curve(&CurveSource::new(&path), &config(InputFormat::Whitespace)).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, AnalysisError::NoSamples { .. }));
    }

    #[test]
    fn parse_column_rejects_non_finite() {
        assert!(parse_column(&["1", "inf"], 2, "stress").is_err());
        assert!(parse_column(&["1", "NaN"], 2, "stress").is_err());
        assert_eq!(parse_column(&["1", "2.5"], 2, "stress"), Ok(2.5));
    }
}

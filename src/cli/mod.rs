//! Command-line parsing for the stress-strain analyser.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numeric code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{FitMode, InputFormat, TruncationPolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tensile", version, about = "Stress-strain curve analysis (modulus, strength, toughness)")]
pub struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyse one curve, or compare two, and write the results file.
    Analyze(AnalyzeArgs),
    /// Print the results block of a previously exported analysis JSON.
    Show(ShowArgs),
}

/// Options for analysing a dataset.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Primary stress-strain dataset.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Second dataset to compare against the primary one.
    #[arg(long, value_name = "PATH")]
    pub file2: Option<PathBuf>,

    /// Fit type: 0 = none (plot only), 1 = affine, 2 = through the origin.
    #[arg(short = 't', long = "fit-type", value_enum, default_value_t = FitMode::ZeroIntercept)]
    pub fit_type: FitMode,

    /// Strain column (1-indexed).
    #[arg(long, default_value_t = 2)]
    pub j1: usize,

    /// Stress column (1-indexed).
    #[arg(long, default_value_t = 3)]
    pub j2: usize,

    /// Number of leading samples used for the elastic fit.
    #[arg(long, default_value_t = 10)]
    pub yn: usize,

    /// How the end of the toughness integration range is located.
    #[arg(long, value_enum, default_value_t = TruncationPolicy::Count)]
    pub truncation: TruncationPolicy,

    /// Input table format.
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// Title of the terminal preview.
    #[arg(long, default_value = "Tensile")]
    pub title: String,

    /// Render an ASCII preview of the curve(s) and fit line(s).
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,

    /// Do not write the `*_fitting_results.txt` file.
    #[arg(long)]
    pub no_results_file: bool,

    /// Export per-sample values to CSV.
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Export the analysis (config + per-curve results) to JSON.
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,
}

/// Options for re-rendering a saved analysis.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Analysis JSON file produced by `tensile analyze --export-json`.
    #[arg(long, value_name = "JSON")]
    pub json: PathBuf,
}

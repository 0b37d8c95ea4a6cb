//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads and analyses the curve(s)
//! - prints the summary, results block and optional plot
//! - writes the results file and optional exports

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{AnalyzeArgs, Command, ShowArgs};
use crate::domain::{AnalysisConfig, AnalysisRequest, Columns, FitWindow, RunConfig};
use crate::error::AppError;
use crate::report::CurveMetrics;

pub mod pipeline;

/// Entry point for the `tensile` binary.
pub fn run() -> Result<(), AppError> {
    // `tensile FILE ...` behaves like `tensile analyze FILE ...`.
    let command_line: Vec<String> = std::env::args().collect();
    let cli = crate::cli::Cli::parse_from(rewrite_args(command_line.clone()));

    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Analyze(args) => handle_analyze(&args, &command_line),
        Command::Show(args) => handle_show(&args),
    }
}

fn handle_analyze(args: &AnalyzeArgs, command_line: &[String]) -> Result<(), AppError> {
    let config = run_config_from_args(args)?;
    debug!(command = %command_line.join(" "), "analyze");
    let run = pipeline::run_analysis(&config.request, &config.analysis);

    // A single curve that could not be loaded or fitted has nothing to report.
    if let (Err(e), false) = (&run.primary().result, run.is_comparative()) {
        return Err(AppError::new(e.exit_code(), e.to_string()));
    }

    println!("{}", crate::report::format_run_summary(&run, &config.analysis));

    let results = crate::report::format_run_results(&run, &config.analysis);
    if let Some(text) = &results {
        print!("{text}");
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run, &config.title, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    match &results {
        Some(text) if config.write_results => {
            let path = crate::io::export::results_path(
                &config.request.primary().path,
                config.analysis.columns,
                config.request.comparison().map(|s| s.path.as_path()),
                run.primary().fit(),
            );
            crate::io::export::write_results_text(&path, text)?;
            info!(path = %path.display(), "results written");
        }
        _ => debug!("no results file written"),
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_samples_csv(path, &run)?;
        info!(path = %path.display(), "sample CSV written");
    }
    if let Some(path) = &config.export_json {
        crate::io::summary::write_analysis_json(path, &run, &config.analysis, command_line)?;
        info!(path = %path.display(), "analysis JSON written");
    }

    match run.first_error() {
        Some(e) => Err(AppError::new(e.exit_code(), e.to_string())),
        None => Ok(()),
    }
}

fn handle_show(args: &ShowArgs) -> Result<(), AppError> {
    let analysis = crate::io::summary::read_analysis_json(&args.json)?;
    debug!(
        curves = analysis.curves.len(),
        generated = %analysis.generated,
        command = %analysis.command.join(" "),
        "analysis loaded"
    );

    for curve in &analysis.curves {
        for e in &curve.errors {
            eprintln!("{}: {e}", curve.label);
        }
    }

    let metrics: Vec<CurveMetrics> = analysis.curves.iter().map(|c| c.metrics()).collect();
    match crate::report::format_results_block(&metrics) {
        Some(text) if analysis.config.fit_mode.is_enabled() => print!("{text}"),
        _ => println!("No fit results in '{}'.", args.json.display()),
    }
    Ok(())
}

/// Build and validate the run configuration from CLI flags.
pub fn run_config_from_args(args: &AnalyzeArgs) -> Result<RunConfig, AppError> {
    let columns = Columns::new(args.j1, args.j2)?;
    if args.fit_type.is_enabled() {
        FitWindow::new(args.yn)?;
    }

    Ok(RunConfig {
        request: AnalysisRequest::from_paths(args.file.clone(), args.file2.clone()),
        analysis: AnalysisConfig {
            fit_mode: args.fit_type,
            fit_window: args.yn,
            truncation: args.truncation,
            columns,
            format: args.format,
        },
        title: args.title.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        write_results: !args.no_results_file,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    })
}

/// Rewrite argv so `tensile FILE` defaults to `tensile analyze FILE`.
///
/// Rules:
/// - `tensile`                          -> unchanged (clap prints usage)
/// - `tensile data.dat -t 1 ...`        -> `tensile analyze data.dat -t 1 ...`
/// - `tensile -v data.dat`              -> `tensile analyze -v data.dat`
/// - `tensile -v show --json a.json`    -> unchanged (global flags are skipped)
/// - `tensile --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv
        .iter()
        .skip(1)
        .find(|a| !matches!(a.as_str(), "-v" | "--verbose"))
        .cloned()
    else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "show");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}

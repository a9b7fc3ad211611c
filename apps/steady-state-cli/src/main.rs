//! Steady-state detection CLI
//!
//! Reads every run file in a directory, appends the steady-state sample index
//! of each run to the matching result file, and prints a batch summary.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use steady_state::config::{Config, DetectorConfig, InputConfig};
use steady_state::reporter::{OutputFormat, Reporter};
use steady_state::runner::{BatchRunner, BatchSummary};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the steady-state detector
#[derive(Parser, Debug)]
#[command(name = "steady-state")]
#[command(
    version,
    about = "Find the sample index where benchmark runs reach a steady state"
)]
struct Args {
    /// Directory of run files (overrides [input].directory)
    input_dir: Option<PathBuf>,

    /// Directory of run files, as a flag
    #[arg(long = "input-dir", value_name = "DIR", conflicts_with = "input_dir")]
    input_dir_flag: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Samples per window
    #[arg(long)]
    window_size: Option<usize>,

    /// Samples shared by consecutive windows
    #[arg(long)]
    window_overlap: Option<usize>,

    /// Fraction of the CV range that counts as a volatility change
    #[arg(long)]
    change_threshold: Option<f64>,

    /// Fraction of the mean range that counts as a level change
    #[arg(long)]
    mean_change_threshold: Option<f64>,

    /// Change-point gap, in windows, that counts as a quiet stretch
    #[arg(long)]
    clean_windows: Option<usize>,

    /// Extension of run files
    #[arg(long)]
    input_extension: Option<String>,

    /// Extension of result files
    #[arg(long)]
    output_extension: Option<String>,

    /// Summary format printed to stdout
    #[arg(short, long, value_enum, default_value = "console")]
    format: Format,

    /// Also write the summary to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Analyze without appending to result files
    #[arg(long)]
    dry_run: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Console,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Console => OutputFormat::Console,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

impl Args {
    /// Merge the config file (if any) with command-line overrides
    fn resolve(&self) -> Result<(DetectorConfig, InputConfig)> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        let mut detector = config.detector;
        if let Some(window_size) = self.window_size {
            detector.window_size = window_size;
        }
        if let Some(window_overlap) = self.window_overlap {
            detector.window_overlap = window_overlap;
        }
        if let Some(change_threshold) = self.change_threshold {
            detector.change_threshold = change_threshold;
        }
        if let Some(mean_change_threshold) = self.mean_change_threshold {
            detector.mean_change_threshold = mean_change_threshold;
        }
        if let Some(clean_windows) = self.clean_windows {
            detector.clean_windows_required = clean_windows;
        }

        let input_dir = self.input_dir.as_ref().or(self.input_dir_flag.as_ref());
        let mut input = match (input_dir, config.input) {
            (Some(dir), Some(input)) => InputConfig {
                directory: dir.clone(),
                ..input
            },
            (Some(dir), None) => InputConfig::new(dir),
            (None, Some(input)) => input,
            (None, None) => bail!("No input directory given; pass one or set [input].directory"),
        };
        if let Some(ext) = &self.input_extension {
            input.input_extension = ext.clone();
        }
        if let Some(ext) = &self.output_extension {
            input.output_extension = ext.clone();
        }

        Ok((detector, input))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so a JSON summary on stdout stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (detector, input) = args.resolve()?;
    tracing::info!(
        "Analyzing {} (window {}, overlap {})",
        input.directory.display(),
        detector.window_size,
        detector.window_overlap
    );

    let runner = BatchRunner::new(detector, input)?.dry_run(args.dry_run);
    let summary = runner.run()?;

    let reporter = Reporter::new(args.format.into());
    emit_report(&reporter, &summary, args.report.as_deref());

    Ok(())
}

/// Print the summary and optionally write it to `report`.
///
/// Failures are logged, not returned, so they never change the exit status.
/// Returns whether every output was written.
fn emit_report(reporter: &Reporter, summary: &BatchSummary, report: Option<&Path>) -> bool {
    let mut ok = true;
    if let Err(e) = reporter.report(summary) {
        tracing::warn!("Failed to print report: {}", e);
        ok = false;
    }
    if let Some(path) = report {
        match reporter.write_to_file(summary, path) {
            Ok(()) => tracing::info!("Report written to {}", path.display()),
            Err(e) => {
                tracing::warn!("Failed to write report to {}: {}", path.display(), e);
                ok = false;
            }
        }
    }
    ok
}

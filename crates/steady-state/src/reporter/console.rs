//! Console reporter for batch summaries
//!
//! Provides human-readable output with one table per run file.

use anyhow::Result;
use std::fmt::Write;

use crate::runner::{BatchSummary, FileOutcome, RunOutcome};

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format a batch summary for console output
    pub fn format(summary: &BatchSummary) -> Result<String> {
        let mut output = String::new();

        // Header
        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                   STEADY-STATE DETECTION                     ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        writeln!(output, "Input:     {}", summary.input_directory.display())?;
        writeln!(output, "Started:   {}", summary.started_at)?;
        writeln!(output, "Duration:  {}ms", summary.total_duration_ms)?;
        if summary.dry_run {
            writeln!(output, "Mode:      dry run (no result files written)")?;
        }
        writeln!(output)?;

        let detector = &summary.detector;
        writeln!(output, "Configuration:")?;
        writeln!(output, "  Window Size:            {}", detector.window_size)?;
        writeln!(output, "  Window Overlap:         {}", detector.window_overlap)?;
        writeln!(output, "  CV Change Threshold:    {}", detector.change_threshold)?;
        writeln!(output, "  Mean Change Threshold:  {}", detector.mean_change_threshold)?;
        writeln!(output, "  Clean Windows Required: {}", detector.clean_windows_required)?;
        writeln!(output)?;

        for file in &summary.files {
            Self::format_file(&mut output, file)?;
        }

        writeln!(output)?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(
            output,
            "Files: {} ({} failed)   Runs: {} analyzed, {} without steady state, {} failed",
            summary.files.len(),
            summary.files_failed(),
            summary.runs_analyzed(),
            summary.runs_without_steady_state(),
            summary.runs_failed()
        )?;
        if summary.failed_writes() > 0 {
            writeln!(output, "Failed writes: {}", summary.failed_writes())?;
        }
        writeln!(output)?;
        Ok(output)
    }

    fn format_file(output: &mut String, file: &FileOutcome) -> Result<()> {
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output, "File: {}", file.path.display())?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;

        if let Some(error) = &file.error {
            writeln!(output, "  ✗ {}", error)?;
            writeln!(output)?;
            return Ok(());
        }

        writeln!(output, "  Results: {}", file.output_path.display())?;
        writeln!(output)?;
        writeln!(
            output,
            "  {:>4}  {:>8}  {:>7}  {:>13}  {:>12}",
            "Run", "Samples", "Windows", "Change Points", "Steady State"
        )?;
        for run in &file.runs {
            Self::format_run(output, run)?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn format_run(output: &mut String, run: &RunOutcome) -> Result<()> {
        let steady = match (&run.error, run.sample_index) {
            (Some(_), _) => "error".to_string(),
            (None, Some(index)) => index.to_string(),
            (None, None) => "-".to_string(),
        };

        write!(
            output,
            "  {:>4}  {:>8}  {:>7}  {:>13}  {:>12}",
            run.run_index,
            run.sample_count,
            run.window_count,
            run.change_points.len(),
            steady
        )?;
        if let Some(error) = &run.error {
            write!(output, "  ({})", error)?;
        }
        if let Some(error) = &run.write_error {
            write!(output, "  (not written: {})", error)?;
        }
        writeln!(output)?;
        Ok(())
    }
}

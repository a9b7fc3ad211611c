//! Batch summary reporting
//!
//! This module formats a [`BatchSummary`] for people or for machines.
//!
//! # Output Formats
//!
//! - **JSON**: Machine-readable format for downstream pipelines
//! - **Console**: Human-readable table of steady-state indices
//!
//! # Example
//!
//! ```no_run
//! use steady_state::reporter::{Reporter, OutputFormat};
//! use steady_state::runner::BatchSummary;
//!
//! # fn example(summary: BatchSummary) -> anyhow::Result<()> {
//! let reporter = Reporter::new(OutputFormat::Console);
//! reporter.report(&summary)?;
//!
//! // Or write to a file
//! Reporter::new(OutputFormat::JsonPretty)
//!     .write_to_file(&summary, "steady-state.json")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod json;

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::runner::BatchSummary;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

/// Output format for batch summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Console output with a table per file
    #[default]
    Console,
}

/// Reporter for batch summaries
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report the summary to stdout
    pub fn report(&self, summary: &BatchSummary) -> Result<()> {
        let output = self.format_summary(summary)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Write the summary to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, summary: &BatchSummary, path: P) -> Result<()> {
        let output = self.format_summary(summary)?;
        fs::write(path, output)?;
        Ok(())
    }

    /// Format the summary as a string
    pub fn format_summary(&self, summary: &BatchSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(summary, false),
            OutputFormat::JsonPretty => JsonReporter::format(summary, true),
            OutputFormat::Console => ConsoleReporter::format(summary),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    use crate::config::DetectorConfig;
    use crate::resolver::SteadyState;
    use crate::runner::{BatchSummary, FileOutcome, RunOutcome};

    pub fn create_test_summary() -> BatchSummary {
        BatchSummary {
            input_directory: PathBuf::from("/data/timeseries"),
            detector: DetectorConfig::default(),
            files: vec![
                FileOutcome {
                    path: PathBuf::from("/data/timeseries/json-parse.json"),
                    output_path: PathBuf::from("/data/timeseries/json-parse.txt"),
                    runs: vec![
                        RunOutcome {
                            run_index: 0,
                            sample_count: 3000,
                            window_count: 74,
                            change_points: vec![29, 30],
                            steady_state: Some(SteadyState::AtWindow(30)),
                            sample_index: Some(1200),
                            output_line: "1200".to_string(),
                            error: None,
                            write_error: None,
                        },
                        RunOutcome {
                            run_index: 1,
                            sample_count: 3000,
                            window_count: 74,
                            change_points: Vec::new(),
                            steady_state: Some(SteadyState::NoChangePoint),
                            sample_index: None,
                            output_line: String::new(),
                            error: None,
                            write_error: None,
                        },
                    ],
                    error: None,
                },
                FileOutcome {
                    path: PathBuf::from("/data/timeseries/broken.json"),
                    output_path: PathBuf::from("/data/timeseries/broken.txt"),
                    runs: Vec::new(),
                    error: Some("Failed to parse run file".to_string()),
                },
            ],
            dry_run: false,
            started_at: "2024-01-01T00:00:00+00:00".to_string(),
            total_duration_ms: 42,
        }
    }
}

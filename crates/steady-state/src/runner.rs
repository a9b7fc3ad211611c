//! Batch orchestration over a directory of run files
//!
//! The runner lists the run files of the input directory, detects the steady
//! state of every run in every file, and appends one line per run to the
//! file's result file. Failures are contained per file (unreadable or
//! malformed input) or per run (too short, write error) and recorded in the
//! returned [`BatchSummary`]; the rest of the batch carries on.
//!
//! Line `n` of a result file always belongs to run `n` of the run file: a run
//! that cannot be analyzed still appends an empty line.
//!
//! # Example
//!
//! ```no_run
//! use steady_state::config::{DetectorConfig, InputConfig};
//! use steady_state::runner::BatchRunner;
//!
//! # fn example() -> anyhow::Result<()> {
//! let runner = BatchRunner::new(DetectorConfig::default(), InputConfig::new("timeseries"))?;
//! let summary = runner.run()?;
//!
//! for file in &summary.files {
//!     println!("{}: {} runs", file.path.display(), file.runs.len());
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::config::{DetectorConfig, InputConfig};
use crate::detector::SteadyStateDetector;
use crate::resolver::SteadyState;
use crate::run_file::{self, RunFile};

/// Results from a complete batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Directory the run files were read from
    pub input_directory: PathBuf,
    /// Detector parameters used for every run
    pub detector: DetectorConfig,
    /// Outcome for each run file, in path order
    pub files: Vec<FileOutcome>,
    /// Whether result files were left untouched
    pub dry_run: bool,
    /// Timestamp when the batch started
    pub started_at: String,
    /// Total duration of the batch in milliseconds
    pub total_duration_ms: u64,
}

impl BatchSummary {
    /// Runs that produced a detection
    pub fn runs_analyzed(&self) -> usize {
        self.all_runs().filter(|run| run.error.is_none()).count()
    }

    /// Analyzed runs without a steady-state index
    pub fn runs_without_steady_state(&self) -> usize {
        self.all_runs()
            .filter(|run| run.error.is_none() && run.sample_index.is_none())
            .count()
    }

    /// Runs that could not be analyzed
    pub fn runs_failed(&self) -> usize {
        self.all_runs().filter(|run| run.error.is_some()).count()
    }

    /// Files that could not be read or parsed
    pub fn files_failed(&self) -> usize {
        self.files.iter().filter(|file| file.error.is_some()).count()
    }

    /// Result lines that could not be written
    pub fn failed_writes(&self) -> usize {
        self.all_runs().filter(|run| run.write_error.is_some()).count()
    }

    fn all_runs(&self) -> impl Iterator<Item = &RunOutcome> {
        self.files.iter().flat_map(|file| file.runs.iter())
    }
}

/// Outcome for a single run file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path of the run file
    pub path: PathBuf,
    /// Path of the result file
    pub output_path: PathBuf,
    /// One entry per run in the file
    pub runs: Vec<RunOutcome>,
    /// Read or parse failure; `runs` is empty when set
    pub error: Option<String>,
}

/// Outcome for a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Position of the run in its file
    pub run_index: usize,
    /// Number of samples in the run
    pub sample_count: usize,
    /// Number of windows the run was cut into
    pub window_count: usize,
    /// Fused change-point window indices
    pub change_points: Vec<usize>,
    /// Resolved steady state, if the run was analyzed
    pub steady_state: Option<SteadyState>,
    /// Steady-state boundary in samples
    pub sample_index: Option<usize>,
    /// Line appended to the result file; empty when the run was not analyzed
    pub output_line: String,
    /// Why the run could not be analyzed
    pub error: Option<String>,
    /// Why the result line could not be written
    pub write_error: Option<String>,
}

impl RunOutcome {
    fn failed(run_index: usize, sample_count: usize, error: String) -> Self {
        RunOutcome {
            run_index,
            sample_count,
            window_count: 0,
            change_points: Vec::new(),
            steady_state: None,
            sample_index: None,
            output_line: String::new(),
            error: Some(error),
            write_error: None,
        }
    }
}

/// The batch runner
#[derive(Debug, Clone)]
pub struct BatchRunner {
    detector: SteadyStateDetector,
    input: InputConfig,
    dry_run: bool,
}

impl BatchRunner {
    /// Create a runner for `input` after validating `detector`
    pub fn new(detector: DetectorConfig, input: InputConfig) -> Result<Self> {
        let detector =
            SteadyStateDetector::new(detector).context("Invalid detector configuration")?;
        Ok(Self {
            detector,
            input,
            dry_run: false,
        })
    }

    /// Analyze without appending to result files
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every run file in the input directory.
    ///
    /// # Errors
    ///
    /// Only a failure to list the input directory aborts the batch.
    pub fn run(&self) -> Result<BatchSummary> {
        let started_at = chrono::Utc::now();
        let timer = std::time::Instant::now();

        let paths = run_file::list_run_files(&self.input.directory, &self.input.input_extension)
            .with_context(|| {
                format!(
                    "Failed to list run files in {}",
                    self.input.directory.display()
                )
            })?;
        info!(
            "Found {} run files in {}",
            paths.len(),
            self.input.directory.display()
        );

        let files = paths.iter().map(|path| self.process_file(path)).collect();

        Ok(BatchSummary {
            input_directory: self.input.directory.clone(),
            detector: *self.detector.config(),
            files,
            dry_run: self.dry_run,
            started_at: started_at.to_rfc3339(),
            total_duration_ms: timer.elapsed().as_millis() as u64,
        })
    }

    /// Process every run of one run file
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        let output_path = run_file::output_path(path, &self.input.output_extension);

        let file = match RunFile::load(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Skipping run file: {}", e);
                return FileOutcome {
                    path: path.to_path_buf(),
                    output_path,
                    runs: Vec::new(),
                    error: Some(e.to_string()),
                };
            }
        };

        let runs = file
            .runs
            .iter()
            .enumerate()
            .map(|(run_index, samples)| self.process_run(run_index, samples, &output_path))
            .collect();

        FileOutcome {
            path: path.to_path_buf(),
            output_path,
            runs,
            error: None,
        }
    }

    fn process_run(&self, run_index: usize, samples: &[f64], output_path: &Path) -> RunOutcome {
        let mut outcome = match self.detector.detect(samples) {
            Ok(detection) => RunOutcome {
                run_index,
                sample_count: detection.sample_count,
                window_count: detection.windows.len(),
                change_points: detection.change_points.fused.clone(),
                steady_state: Some(detection.steady_state),
                sample_index: detection.sample_index(),
                output_line: detection.output_line(),
                error: None,
                write_error: None,
            },
            Err(e) => {
                warn!(run_index, "Run not analyzed, writing an empty line: {}", e);
                RunOutcome::failed(run_index, samples.len(), e.to_string())
            }
        };

        if !self.dry_run {
            match run_file::append_line(output_path, &outcome.output_line) {
                Ok(()) => info!("Wrote to {}.", output_path.display()),
                Err(e) => {
                    warn!(run_index, "Failed to write result: {}", e);
                    outcome.write_error = Some(e.to_string());
                }
            }
        }

        outcome
    }
}

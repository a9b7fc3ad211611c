//! Steady-state detection for benchmark timing runs
//!
//! Benchmark harnesses record thousands of timing samples per run, and the
//! early samples are distorted by JIT warm-up, cold caches and other
//! transients. This crate finds the sample index after which a run's timing
//! no longer drifts or swings, so downstream analysis can drop the unstable
//! prefix.
//!
//! # Pipeline
//!
//! - **Robust statistics**: nearest-rank percentiles, median, and a wide
//!   percentile fence that strips extreme spikes ([`stats`])
//! - **Window statistics**: trimmed mean and coefficient of variation over
//!   overlapping windows ([`window`])
//! - **Change points**: range-relative jumps in mean or CV between
//!   consecutive windows, fused by union ([`change_point`])
//! - **Resolution**: the last change point before a quiet stretch of windows
//!   ([`resolver`])
//! - **Batch runner**: run files in, one result line per run out ([`runner`])
//!
//! # Example
//!
//! ```
//! use steady_state::{DetectorConfig, SteadyState, SteadyStateDetector};
//!
//! # fn example() -> steady_state::Result<()> {
//! let detector = SteadyStateDetector::new(DetectorConfig::default())?;
//!
//! let flat = vec![12.5; 3000];
//! let detection = detector.detect(&flat)?;
//! assert_eq!(detection.steady_state, SteadyState::NoChangePoint);
//! assert_eq!(detection.output_line(), "");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Configuration
//!
//! Detector parameters and the input location can be read from TOML:
//!
//! ```toml
//! [detector]
//! window_size = 50
//! window_overlap = 10
//! change_threshold = 0.3
//! mean_change_threshold = 0.5
//! clean_windows_required = 5
//!
//! [input]
//! directory = "timeseries"
//! input_extension = "json"
//! output_extension = "txt"
//! ```

pub mod change_point;
pub mod config;
pub mod detector;
pub mod error;
pub mod reporter;
pub mod resolver;
pub mod run_file;
pub mod runner;
pub mod stats;
pub mod window;

// Re-export main types for convenience
pub use change_point::ChangePoints;
pub use config::{Config, DetectorConfig, InputConfig};
pub use detector::{Detection, SteadyStateDetector};
pub use error::{Result, SteadyStateError};
pub use reporter::{OutputFormat, Reporter};
pub use resolver::SteadyState;
pub use runner::{BatchRunner, BatchSummary, FileOutcome, RunOutcome};
pub use window::WindowStats;

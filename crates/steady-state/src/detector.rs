//! Steady-state detection for a single run
//!
//! [`SteadyStateDetector`] chains the pipeline stages for one sample
//! sequence:
//!
//! ```text
//! samples ──► WindowStats ──► ChangePoints ──► SteadyState ──► sample index
//!           (trim, mean, CV)  (mean ∪ CV jumps)  (gap rule)     (× stride)
//! ```
//!
//! # Example
//!
//! ```
//! use steady_state::{DetectorConfig, SteadyStateDetector};
//!
//! # fn example() -> steady_state::Result<()> {
//! let mut samples = vec![1.0; 3000];
//! for sample in &mut samples[1200..] {
//!     *sample = 10.0;
//! }
//!
//! let detector = SteadyStateDetector::new(DetectorConfig::default())?;
//! let detection = detector.detect(&samples)?;
//! assert_eq!(detection.sample_index(), Some(1200));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use tracing::debug;

use crate::change_point::ChangePoints;
use crate::config::DetectorConfig;
use crate::error::{Result, SteadyStateError};
use crate::resolver::SteadyState;
use crate::window::WindowStats;

/// Everything computed for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Number of samples in the run
    pub sample_count: usize,
    /// Stride the window indices are scaled by
    pub stride: usize,
    /// Per-window statistics
    pub windows: WindowStats,
    /// Mean, CV and fused change points
    pub change_points: ChangePoints,
    /// Resolved steady-state window
    pub steady_state: SteadyState,
}

impl Detection {
    /// Steady-state boundary in the sample domain
    pub fn sample_index(&self) -> Option<usize> {
        self.steady_state.sample_index(self.stride)
    }

    /// Line to append to the result file
    pub fn output_line(&self) -> String {
        self.steady_state.output_line(self.stride)
    }
}

/// Windowed change-point detector bound to one validated configuration
#[derive(Debug, Clone, Default)]
pub struct SteadyStateDetector {
    config: DetectorConfig,
}

impl SteadyStateDetector {
    /// Create a detector after validating `config`
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run the full pipeline over one sample sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SteadyStateError::SequenceTooShort`] when `samples` does
    /// not produce a single window. Degenerate statistics (NaN means or
    /// CVs) are not errors and flow through to the result.
    pub fn detect(&self, samples: &[f64]) -> Result<Detection> {
        let stride = self.config.stride();
        let windows = WindowStats::compute(samples, &self.config);
        if windows.is_empty() {
            return Err(SteadyStateError::SequenceTooShort {
                len: samples.len(),
                stride,
            });
        }

        let change_points = ChangePoints::detect(&windows, &self.config);
        let steady_state =
            SteadyState::resolve(&change_points.fused, self.config.clean_windows_required);

        debug!(
            samples = samples.len(),
            windows = windows.len(),
            trimmed = windows.total_trimmed(),
            cv_change_points = change_points.cv.len(),
            mean_change_points = change_points.mean.len(),
            %steady_state,
            "run analyzed"
        );

        Ok(Detection {
            sample_count: samples.len(),
            stride,
            windows,
            change_points,
            steady_state,
        })
    }
}

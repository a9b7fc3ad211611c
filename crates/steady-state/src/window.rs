//! Rolling, outlier-trimmed window statistics
//!
//! A run is cut into overlapping windows of `window_size` samples whose
//! starts are `stride` samples apart. Each window is trimmed with
//! [`OutlierBounds`] and reduced to a trimmed mean and a coefficient of
//! variation.
//!
//! The spread used for the coefficient of variation is the square root of the
//! *summed* squared deviations, not divided by the sample count. The change
//! thresholds are tuned against that quantity, so it must not be swapped for
//! a textbook standard deviation.

use tracing::trace;

use crate::config::DetectorConfig;
use crate::stats::OutlierBounds;

/// Statistics of a single trimmed window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSummary {
    /// Offset of the first sample of the window
    pub start: usize,
    /// Samples in the window before trimming
    pub len: usize,
    /// Samples removed by the outlier fence
    pub trimmed: usize,
    /// Mean of the kept samples
    pub mean: f64,
    /// Root of the summed squared deviations from `mean`
    pub spread: f64,
    /// `spread / mean`
    pub coefficient_of_variation: f64,
}

impl WindowSummary {
    /// Trim `window` and compute its statistics.
    ///
    /// An empty window (or one the fence empties) yields a NaN mean, which
    /// is passed through rather than rejected.
    pub fn from_window(start: usize, window: &[f64]) -> Self {
        let kept = match OutlierBounds::compute(window) {
            Some(bounds) => bounds.trim(window),
            None => Vec::new(),
        };

        let mean = kept.iter().sum::<f64>() / kept.len() as f64;
        let spread = kept.iter().map(|&x| (x - mean).powi(2)).sum::<f64>().sqrt();

        WindowSummary {
            start,
            len: window.len(),
            trimmed: window.len() - kept.len(),
            mean,
            spread,
            coefficient_of_variation: spread / mean,
        }
    }
}

/// Parallel per-window statistic series for one run.
///
/// `means[k]` and `coefficients_of_variation[k]` describe window `k`; both
/// series always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowStats {
    pub means: Vec<f64>,
    pub coefficients_of_variation: Vec<f64>,
    pub windows: Vec<WindowSummary>,
}

impl WindowStats {
    /// Slide the configured window over `samples`.
    ///
    /// A window starts at every multiple of the stride `i` with
    /// `i + stride < samples.len()`. The last windows may hold fewer than
    /// `window_size` samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use steady_state::config::DetectorConfig;
    /// use steady_state::window::WindowStats;
    ///
    /// let samples = vec![2.0; 3000];
    /// let stats = WindowStats::compute(&samples, &DetectorConfig::default());
    /// assert_eq!(stats.len(), 74);
    /// assert!(stats.means.iter().all(|&m| m == 2.0));
    /// ```
    pub fn compute(samples: &[f64], config: &DetectorConfig) -> Self {
        let stride = config.stride().max(1);
        let mut stats = WindowStats::default();

        let mut start = 0;
        while start + stride < samples.len() {
            let end = start.saturating_add(config.window_size).min(samples.len());
            let summary = WindowSummary::from_window(start, &samples[start..end]);
            trace!(
                start,
                trimmed = summary.trimmed,
                mean = summary.mean,
                cv = summary.coefficient_of_variation,
                "window summarized"
            );

            stats.means.push(summary.mean);
            stats
                .coefficients_of_variation
                .push(summary.coefficient_of_variation);
            stats.windows.push(summary);
            start += stride;
        }

        stats
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Total samples removed by the outlier fence across all windows
    pub fn total_trimmed(&self) -> usize {
        self.windows.iter().map(|w| w.trimmed).sum()
    }
}

/// Number of windows [`WindowStats::compute`] produces for `len` samples.
pub fn window_count(len: usize, config: &DetectorConfig) -> usize {
    let stride = config.stride().max(1);
    if len <= stride {
        0
    } else {
        (len - stride).div_ceil(stride)
    }
}

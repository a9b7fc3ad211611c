//! Outlier fences for window trimming.
//!
//! The fence is centred on the median and extends three times the spread
//! between the 10th and 90th percentiles in both directions. It is much wider
//! than a classic 1.5 * IQR Tukey fence and only removes extreme spikes.


use super::percentiles::{median, percentile, sorted_copy};

/// Multiplier applied to the percentile spread.
pub const FENCE_MULTIPLIER: f64 = 3.0;
/// Lower percentile of the spread.
pub const LOWER_PERCENTILE: f64 = 10.0;
/// Upper percentile of the spread.
pub const UPPER_PERCENTILE: f64 = 90.0;

/// Inclusive acceptance interval `[lower, upper]` around the median.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    /// Median of the samples the bounds were computed from
    pub median: f64,
    /// Lower fence (median - range)
    pub lower: f64,
    /// Upper fence (median + range)
    pub upper: f64,
}

impl OutlierBounds {
    /// Compute the fence for a set of raw (unsorted) samples.
    ///
    /// # Returns
    ///
    /// * `Some(bounds)` - The acceptance interval
    /// * `None` - If `samples` is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use steady_state::stats::OutlierBounds;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    /// let bounds = OutlierBounds::compute(&data).unwrap();
    /// // p90 - p10 = 9 - 1, scaled by 3, around a median of 5.5
    /// assert_eq!(bounds.lower, 5.5 - 24.0);
    /// assert_eq!(bounds.upper, 5.5 + 24.0);
    /// ```
    pub fn compute(samples: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(samples);

        let spread =
            percentile(UPPER_PERCENTILE, &sorted)? - percentile(LOWER_PERCENTILE, &sorted)?;
        let range = FENCE_MULTIPLIER * spread;
        let median = median(&sorted)?;

        Some(OutlierBounds {
            median,
            lower: median - range,
            upper: median + range,
        })
    }

    /// Whether `value` lies inside the fence.
    ///
    /// Only values strictly below `lower` or strictly above `upper` are
    /// rejected. NaN compares false against both and is kept.
    pub fn contains(&self, value: f64) -> bool {
        !(value < self.lower || value > self.upper)
    }

    /// Copy of `samples` with outliers removed, preserving order.
    pub fn trim(&self, samples: &[f64]) -> Vec<f64> {
        samples.iter().copied().filter(|&v| self.contains(v)).collect()
    }
}

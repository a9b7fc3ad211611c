//! Change-point detection over window statistics
//!
//! Two signals are derived from the window series: a jump in the trimmed mean
//! (level shift) and a jump in the coefficient of variation (volatility
//! shift). Each signal uses an adaptive threshold proportional to the range
//! of its own series, and the two index sets are fused by set union.

use std::collections::BTreeSet;

use crate::config::DetectorConfig;
use crate::stats::sorted_copy;
use crate::window::WindowStats;

/// Change points found in one run, as ascending window indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePoints {
    /// Windows whose CV moved by more than the CV threshold
    pub cv: Vec<usize>,
    /// Windows whose mean moved by more than the mean threshold
    pub mean: Vec<usize>,
    /// Union of `cv` and `mean`
    pub fused: Vec<usize>,
}

impl ChangePoints {
    /// Detect and fuse change points for a window series.
    ///
    /// # Examples
    ///
    /// ```
    /// use steady_state::change_point::ChangePoints;
    /// use steady_state::config::DetectorConfig;
    /// use steady_state::window::WindowStats;
    ///
    /// let stats = WindowStats {
    ///     means: vec![1.0, 1.0, 10.0, 10.0],
    ///     coefficients_of_variation: vec![0.0, 0.0, 0.0, 0.0],
    ///     windows: Vec::new(),
    /// };
    /// let points = ChangePoints::detect(&stats, &DetectorConfig::default());
    /// assert_eq!(points.fused, vec![2]);
    /// ```
    pub fn detect(stats: &WindowStats, config: &DetectorConfig) -> Self {
        let cv_threshold =
            config.change_threshold * series_range(&stats.coefficients_of_variation);
        let mean_threshold = config.mean_change_threshold * series_range(&stats.means);

        let cv = flag_jumps(&stats.coefficients_of_variation, cv_threshold);
        let mean = flag_jumps(&stats.means, mean_threshold);
        let fused = fuse(&cv, &mean);

        ChangePoints { cv, mean, fused }
    }

    pub fn is_empty(&self) -> bool {
        self.fused.is_empty()
    }
}

/// `max - min` of a series, taken from a sorted copy.
///
/// NaN sorts last, so any NaN entry makes the range NaN, which in turn makes
/// every threshold comparison false. An empty series has range 0.
pub fn series_range(series: &[f64]) -> f64 {
    let sorted = sorted_copy(series);
    match (sorted.first(), sorted.last()) {
        (Some(min), Some(max)) => max - min,
        _ => 0.0,
    }
}

/// Indices `j >= 1` where `|series[j] - series[j - 1]| > threshold`.
pub fn flag_jumps(series: &[f64], threshold: f64) -> Vec<usize> {
    series
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            if (pair[1] - pair[0]).abs() > threshold {
                Some(i + 1)
            } else {
                None
            }
        })
        .collect()
}

/// Ascending, duplicate-free union of two change-point sets.
pub fn fuse(cv: &[usize], mean: &[usize]) -> Vec<usize> {
    cv.iter()
        .chain(mean)
        .copied()
        .collect::<BTreeSet<usize>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stats(means: Vec<f64>, cvs: Vec<f64>) -> WindowStats {
        WindowStats {
            means,
            coefficients_of_variation: cvs,
            windows: Vec::new(),
        }
    }

    #[test]
    fn test_series_range() {
        assert_eq!(series_range(&[3.0, -1.0, 7.0, 2.0]), 8.0);
        assert_eq!(series_range(&[5.0]), 0.0);
        assert_eq!(series_range(&[]), 0.0);
        assert!(series_range(&[1.0, f64::NAN, 2.0]).is_nan());
    }

    #[test]
    fn test_flag_jumps_strictly_greater() {
        let series = vec![0.0, 1.0, 1.5, 3.5, 3.5];
        assert_eq!(flag_jumps(&series, 1.0), vec![3]);
        assert_eq!(flag_jumps(&series, 0.4), vec![1, 2, 3]);
    }

    #[test]
    fn test_flag_jumps_both_directions() {
        let series = vec![10.0, 0.0, 10.0];
        assert_eq!(flag_jumps(&series, 5.0), vec![1, 2]);
    }

    #[test]
    fn test_flag_jumps_nan_threshold_flags_nothing() {
        let series = vec![0.0, 100.0, 0.0];
        assert!(flag_jumps(&series, f64::NAN).is_empty());
    }

    #[test]
    fn test_fuse_is_sorted_union() {
        assert_eq!(fuse(&[4, 9, 2], &[9, 1]), vec![1, 2, 4, 9]);
        assert_eq!(fuse(&[], &[3]), vec![3]);
        assert_eq!(fuse(&[3], &[]), vec![3]);
        assert!(fuse(&[], &[]).is_empty());
    }

    #[test]
    fn test_detect_mean_and_cv_signals() {
        // Mean range 9 -> threshold 4.5; CV range 1.0 -> threshold 0.3
        let stats = stats(
            vec![1.0, 1.0, 1.0, 10.0, 10.0, 10.0],
            vec![0.1, 0.1, 1.1, 0.1, 0.1, 0.1],
        );
        let points = ChangePoints::detect(&stats, &DetectorConfig::default());

        assert_eq!(points.mean, vec![3]);
        assert_eq!(points.cv, vec![2, 3]);
        assert_eq!(points.fused, vec![2, 3]);
    }

    #[test]
    fn test_detect_flat_series_has_no_change_points() {
        let stats = stats(vec![5.0; 10], vec![0.0; 10]);
        let points = ChangePoints::detect(&stats, &DetectorConfig::default());
        assert!(points.is_empty());
        assert!(points.cv.is_empty());
        assert!(points.mean.is_empty());
    }

    #[test]
    fn test_detect_single_window() {
        let stats = stats(vec![5.0], vec![0.2]);
        assert!(ChangePoints::detect(&stats, &DetectorConfig::default()).is_empty());
    }

    #[test]
    fn test_detect_nan_cv_suppresses_cv_signal() {
        // A zero-mean window produces a NaN CV; the CV range becomes NaN and
        // only the mean signal can fire.
        let stats = stats(
            vec![0.0, 4.0, 4.0, 4.0],
            vec![f64::NAN, 0.5, 0.0, 0.5],
        );
        let points = ChangePoints::detect(&stats, &DetectorConfig::default());

        assert!(points.cv.is_empty());
        assert_eq!(points.mean, vec![1]);
        assert_eq!(points.fused, vec![1]);
    }

    #[test]
    fn test_detect_respects_custom_thresholds() {
        let stats = stats(vec![0.0, 1.0, 2.0, 10.0], vec![0.0; 4]);

        let strict = DetectorConfig {
            mean_change_threshold: 0.5,
            ..DetectorConfig::default()
        };
        assert_eq!(ChangePoints::detect(&stats, &strict).mean, vec![3]);

        let loose = DetectorConfig {
            mean_change_threshold: 0.05,
            ..DetectorConfig::default()
        };
        assert_eq!(ChangePoints::detect(&stats, &loose).mean, vec![1, 2, 3]);
    }
}

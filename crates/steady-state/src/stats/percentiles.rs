//! Percentile and median lookups over sorted samples.
//!
//! Both functions expect their input to be sorted ascending already; callers
//! that hold raw samples should go through [`sorted_copy`] first.

/// Return an ascending copy of `samples`.
///
/// NaN samples sort after every number, whatever their sign bit.
pub fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())));
    sorted
}

/// Nearest-rank percentile of an ascending slice.
///
/// The result is the value at 1-based rank `ceil(p / 100 * n)`. No
/// interpolation is done, so the result is always one of the samples.
///
/// # Arguments
///
/// * `p` - Percentile in `(0.0, 100.0]`
/// * `sorted` - Samples sorted ascending
///
/// # Returns
///
/// * `Some(value)` - The sample at the percentile rank
/// * `None` - If `sorted` is empty or `p` is outside `(0.0, 100.0]`
///
/// # Examples
///
/// ```
/// use steady_state::stats::percentile;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile(50.0, &data), Some(3.0));
/// assert_eq!(percentile(100.0, &data), Some(5.0));
/// assert_eq!(percentile(0.0, &data), None);
/// ```
pub fn percentile(p: f64, sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() || !(p > 0.0 && p <= 100.0) {
        return None;
    }

    let rank = (p / 100.0 * sorted.len() as f64).ceil() as usize;
    // Rounding can push the rank one past the end for p == 100.
    let index = rank.clamp(1, sorted.len()) - 1;
    Some(sorted[index])
}

/// Median of an ascending slice.
///
/// Odd-length input yields the middle element; even-length input yields the
/// mean of the two middle elements.
///
/// # Examples
///
/// ```
/// use steady_state::stats::median;
///
/// assert_eq!(median(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    if n % 2 != 0 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2] + sorted[n / 2 - 1]) / 2.0)
    }
}

//! Reduction of fused change points to a single steady-state index

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of steady-state resolution for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "window", rename_all = "snake_case")]
pub enum SteadyState {
    /// No change point was flagged anywhere in the run
    NoChangePoint,
    /// Last window of instability before the run settles
    AtWindow(usize),
}

impl SteadyState {
    /// Pick the steady-state window from ascending change points.
    ///
    /// The first pair of consecutive change points at least
    /// `clean_windows_required` windows apart marks the end of the unstable
    /// prefix and its earlier index is returned. Without such a gap the last
    /// change point is returned. The input is sorted again before scanning.
    ///
    /// # Examples
    ///
    /// ```
    /// use steady_state::resolver::SteadyState;
    ///
    /// assert_eq!(SteadyState::resolve(&[2, 3, 10, 11, 30], 5), SteadyState::AtWindow(3));
    /// assert_eq!(SteadyState::resolve(&[5], 5), SteadyState::AtWindow(5));
    /// assert_eq!(SteadyState::resolve(&[], 5), SteadyState::NoChangePoint);
    /// ```
    pub fn resolve(change_points: &[usize], clean_windows_required: usize) -> Self {
        let mut sorted = change_points.to_vec();
        sorted.sort_unstable();

        let Some(&last) = sorted.last() else {
            return SteadyState::NoChangePoint;
        };

        sorted
            .windows(2)
            .find(|pair| pair[1] - pair[0] >= clean_windows_required)
            .map_or(SteadyState::AtWindow(last), |pair| {
                SteadyState::AtWindow(pair[0])
            })
    }

    /// Window index, if any
    pub fn window(&self) -> Option<usize> {
        match self {
            SteadyState::NoChangePoint => None,
            SteadyState::AtWindow(window) => Some(*window),
        }
    }

    /// Sample index of the steady-state boundary for windows `stride` apart
    pub fn sample_index(&self, stride: usize) -> Option<usize> {
        self.window().map(|window| window * stride)
    }

    /// Line written to the result file for this run.
    ///
    /// Both "no change point" and a boundary at sample 0 are written as an
    /// empty line.
    pub fn output_line(&self, stride: usize) -> String {
        match self.sample_index(stride) {
            Some(index) if index != 0 => index.to_string(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for SteadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SteadyState::NoChangePoint => write!(f, "no change point"),
            SteadyState::AtWindow(window) => write!(f, "window {}", window),
        }
    }
}

//! Robust statistics for window trimming
//!
//! This module provides the rank-based percentile lookup, the median, and the
//! percentile fence used to strip extreme spikes out of a window before its
//! mean and coefficient of variation are computed.
//!
//! # Examples
//!
//! ```
//! use steady_state::stats::{median, percentile, OutlierBounds};
//!
//! let sorted = vec![1.0, 2.0, 3.0, 4.0];
//! assert_eq!(percentile(50.0, &sorted), Some(2.0));
//! assert_eq!(median(&sorted), Some(2.5));
//!
//! let window = vec![10.0, 11.0, 10.5, 11.5, 10.0, 500.0, 10.2, 10.8, 11.1, 10.4];
//! let bounds = OutlierBounds::compute(&window).unwrap();
//! let trimmed = bounds.trim(&window);
//! assert!(!trimmed.contains(&500.0));
//! ```

pub mod outliers;
pub mod percentiles;

pub use outliers::OutlierBounds;
pub use percentiles::{median, percentile, sorted_copy};

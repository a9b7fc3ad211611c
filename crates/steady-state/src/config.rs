//! Configuration for steady-state detection
//!
//! This module provides the immutable detector parameters shared by every
//! stage of the pipeline, and the TOML configuration file that selects the
//! input directory and file extensions for a batch.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SteadyStateError};

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Detector parameters
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Input location, usually supplied on the command line instead
    #[serde(default)]
    pub input: Option<InputConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - A field has the wrong type
    ///
    /// # Example
    ///
    /// ```no_run
    /// use steady_state::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_file("steady-state.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use steady_state::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     [detector]
    ///     window_size = 100
    ///     window_overlap = 20
    /// "#;
    /// let config = Config::from_str(toml)?;
    /// assert_eq!(config.detector.stride(), 80);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}

/// Parameters of the windowed change-point detector.
///
/// Every stage receives the same value; nothing reads process-wide constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Samples per window (default: 50)
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Samples shared by consecutive windows (default: 10)
    #[serde(default = "default_window_overlap")]
    pub window_overlap: usize,
    /// Fraction of the CV range a window-to-window CV jump must exceed (default: 0.3)
    #[serde(default = "default_change_threshold")]
    pub change_threshold: f64,
    /// Fraction of the mean range a window-to-window mean jump must exceed (default: 0.5)
    #[serde(default = "default_mean_change_threshold")]
    pub mean_change_threshold: f64,
    /// Minimum gap between change points that counts as a quiet stretch (default: 5)
    #[serde(default = "default_clean_windows_required")]
    pub clean_windows_required: usize,
}

fn default_window_size() -> usize {
    50
}

fn default_window_overlap() -> usize {
    10
}

fn default_change_threshold() -> f64 {
    0.3
}

fn default_mean_change_threshold() -> f64 {
    0.5
}

fn default_clean_windows_required() -> usize {
    5
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            window_overlap: default_window_overlap(),
            change_threshold: default_change_threshold(),
            mean_change_threshold: default_mean_change_threshold(),
            clean_windows_required: default_clean_windows_required(),
        }
    }
}

impl DetectorConfig {
    /// Distance between the starts of consecutive windows.
    ///
    /// Only meaningful for a validated configuration.
    pub fn stride(&self) -> usize {
        self.window_size.saturating_sub(self.window_overlap)
    }

    /// Check the parameters for values the detector cannot work with.
    ///
    /// # Example
    ///
    /// ```
    /// use steady_state::config::DetectorConfig;
    ///
    /// let config = DetectorConfig { window_overlap: 50, ..DetectorConfig::default() };
    /// assert!(config.validate().is_err());
    /// assert!(DetectorConfig::default().validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(SteadyStateError::InvalidConfig(
                "window_size must be >= 1".to_string(),
            ));
        }
        if self.window_overlap >= self.window_size {
            return Err(SteadyStateError::InvalidConfig(format!(
                "window_overlap must be smaller than window_size; got overlap {} for size {}",
                self.window_overlap, self.window_size
            )));
        }
        for (name, value) in [
            ("change_threshold", self.change_threshold),
            ("mean_change_threshold", self.mean_change_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SteadyStateError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number; got {value}"
                )));
            }
        }
        if self.clean_windows_required == 0 {
            return Err(SteadyStateError::InvalidConfig(
                "clean_windows_required must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where run files are read from and how result files are named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    /// Directory holding one run file per benchmark
    pub directory: PathBuf,
    /// Extension of run files; other files are skipped (default: "json")
    #[serde(default = "default_input_extension")]
    pub input_extension: String,
    /// Extension of the result file written next to each run file (default: "txt")
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

fn default_input_extension() -> String {
    "json".to_string()
}

fn default_output_extension() -> String {
    "txt".to_string()
}

impl InputConfig {
    /// Input settings for `directory` with default extensions
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            input_extension: default_input_extension(),
            output_extension: default_output_extension(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.detector, DetectorConfig::default());
        assert!(config.input.is_none());
    }

    #[test]
    fn test_default_values() {
        let config = DetectorConfig::default();
        assert_eq!(config.window_size, 50);
        assert_eq!(config.window_overlap, 10);
        assert_eq!(config.change_threshold, 0.3);
        assert_eq!(config.mean_change_threshold, 0.5);
        assert_eq!(config.clean_windows_required, 5);
        assert_eq!(config.stride(), 40);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [detector]
            window_size = 100
            window_overlap = 25
            change_threshold = 0.2
            mean_change_threshold = 0.4
            clean_windows_required = 8

            [input]
            directory = "/data/timeseries"
            input_extension = "runs"
            output_extension = "steady"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.detector.window_size, 100);
        assert_eq!(config.detector.window_overlap, 25);
        assert_eq!(config.detector.change_threshold, 0.2);
        assert_eq!(config.detector.mean_change_threshold, 0.4);
        assert_eq!(config.detector.clean_windows_required, 8);
        assert_eq!(config.detector.stride(), 75);

        let input = config.input.unwrap();
        assert_eq!(input.directory, PathBuf::from("/data/timeseries"));
        assert_eq!(input.input_extension, "runs");
        assert_eq!(input.output_extension, "steady");
    }

    #[test]
    fn test_parse_partial_detector_section() {
        let toml = r#"
            [detector]
            clean_windows_required = 3

            [input]
            directory = "timeseries"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.detector.clean_windows_required, 3);
        assert_eq!(config.detector.window_size, 50);

        let input = config.input.unwrap();
        assert_eq!(input, InputConfig::new("timeseries"));
    }

    #[test]
    fn test_input_section_requires_directory() {
        let toml = r#"
            [input]
            input_extension = "json"
        "#;
        assert!(Config::from_str(toml).is_err());
    }

    #[test]
    fn test_parse_malformed_toml() {
        assert!(Config::from_str("[detector\nwindow_size = 1").is_err());
        assert!(Config::from_str("[detector]\nwindow_size = \"big\"").is_err());
    }

    #[test]
    fn test_validate_rejects_overlap_not_smaller_than_size() {
        let config = DetectorConfig {
            window_size: 10,
            window_overlap: 10,
            ..DetectorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("window_overlap"));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = DetectorConfig {
            window_size: 0,
            window_overlap: 0,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let negative = DetectorConfig {
            change_threshold: -0.1,
            ..DetectorConfig::default()
        };
        assert!(negative.validate().unwrap_err().to_string().contains("change_threshold"));

        let nan = DetectorConfig {
            mean_change_threshold: f64::NAN,
            ..DetectorConfig::default()
        };
        assert!(nan
            .validate()
            .unwrap_err()
            .to_string()
            .contains("mean_change_threshold"));
    }

    #[test]
    fn test_validate_rejects_zero_clean_windows() {
        let config = DetectorConfig {
            clean_windows_required: 0,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_no_overlap() {
        let config = DetectorConfig {
            window_size: 20,
            window_overlap: 0,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.stride(), 20);
    }
}

//! JSON reporter for batch summaries

use crate::runner::BatchSummary;
use anyhow::Result;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format a batch summary as JSON
    ///
    /// # Arguments
    ///
    /// * `summary` - The batch summary to format
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn format(summary: &BatchSummary, pretty: bool) -> Result<String> {
        let mut output = if pretty {
            serde_json::to_string_pretty(summary)?
        } else {
            serde_json::to_string(summary)?
        };
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::test_support::create_test_summary;
    use crate::resolver::SteadyState;

    #[test]
    fn test_json_format_compact() {
        let summary = create_test_summary();
        let output = JsonReporter::format(&summary, false).unwrap();

        // Compact JSON is a single line
        assert_eq!(output.trim_end().lines().count(), 1);
        assert!(output.contains("\"sample_index\":1200"));
    }

    #[test]
    fn test_json_format_pretty() {
        let summary = create_test_summary();
        let output = JsonReporter::format(&summary, true).unwrap();

        assert!(output.lines().count() > 1);
        assert!(output.contains("  "));
    }

    #[test]
    fn test_json_roundtrip() {
        let summary = create_test_summary();
        let json = JsonReporter::format(&summary, false).unwrap();
        let parsed: BatchSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.input_directory, summary.input_directory);
        assert_eq!(parsed.detector, summary.detector);
        assert_eq!(parsed.files.len(), 2);
        assert_eq!(
            parsed.files[0].runs[0].steady_state,
            Some(SteadyState::AtWindow(30))
        );
        assert_eq!(parsed.files[1].error, summary.files[1].error);
    }
}

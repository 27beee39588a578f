#![warn(missing_docs)]
//! snipbench Report - Output Data Model
//!
//! Serializable view of a finished run:
//! - JSON (machine-readable)
//! - Human (terminal table with ratios against the fastest test)

mod human;
mod json;
mod report;

pub use human::{format_human_output, format_ratio};
pub use json::{REPORT_SCHEMA_VERSION, generate_json_report};
pub use report::{
    Report, ReportConfig, ReportMeta, ReportSummary, SystemInfo, TestMetrics, TestReport,
    TestStatus,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Format a duration in milliseconds with an adaptive unit
pub fn format_duration(ms: f64) -> String {
    if ms < 0.001 {
        format!("{:.2} ns", ms * 1_000_000.0)
    } else if ms < 1.0 {
        format!("{:.2} µs", ms * 1_000.0)
    } else if ms < 1_000.0 {
        format!("{:.2} ms", ms)
    } else {
        format!("{:.2} s", ms / 1_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("HUMAN".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0005), "500.00 ns");
        assert_eq!(format_duration(0.25), "250.00 µs");
        assert_eq!(format_duration(12.5), "12.50 ms");
        assert_eq!(format_duration(2_500.0), "2.50 s");
    }
}

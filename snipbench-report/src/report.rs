//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub tests: Vec<TestReport>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    /// Suite description
    pub description: String,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Run parameters captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Samples per test
    pub amount: u32,
    pub inter_sample_delay_ms: Option<f64>,
    pub inter_test_delay_ms: Option<f64>,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
}

/// One test in the report, in suite order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub index: usize,
    pub name: String,
    pub status: TestStatus,
    pub metrics: Option<TestMetrics>,
}

/// Test outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// All samples collected
    Completed,
    /// The candidate panicked
    Failed,
    /// No callable or filtered out
    Skipped,
}

/// Timing metrics of a completed test, all in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMetrics {
    pub samples: usize,
    pub total_ms: f64,
    pub mean_ms: f64,
    pub median_ms: f64,
    pub highest_ms: f64,
    pub lowest_ms: f64,
    /// total / best total; `None` when undefined
    pub relative: Option<f64>,
    pub is_best: bool,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_tests: usize,
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub best_total_ms: Option<f64>,
    /// Index of the fastest test
    pub fastest: Option<usize>,
}

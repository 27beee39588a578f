//! JSON Output

use crate::report::Report;

/// Version of the JSON layout written by [`generate_json_report`]
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Generate a prettified JSON report.
///
/// Serializes the run report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::*;
    use chrono::Utc;

    fn report() -> Report {
        Report {
            meta: ReportMeta {
                schema_version: REPORT_SCHEMA_VERSION,
                version: "0.1.0".to_string(),
                timestamp: Utc::now(),
                description: "loops".to_string(),
                system: SystemInfo {
                    os: "linux".to_string(),
                    arch: "x86_64".to_string(),
                    cpu: "Unknown".to_string(),
                    cpu_cores: 4,
                },
                config: ReportConfig {
                    amount: 10,
                    inter_sample_delay_ms: None,
                    inter_test_delay_ms: Some(50.0),
                },
            },
            tests: vec![
                TestReport {
                    index: 0,
                    name: "for loop".to_string(),
                    status: TestStatus::Completed,
                    metrics: Some(TestMetrics {
                        samples: 10,
                        total_ms: 4.0,
                        mean_ms: 0.4,
                        median_ms: 0.4,
                        highest_ms: 0.5,
                        lowest_ms: 0.3,
                        relative: Some(1.0),
                        is_best: true,
                    }),
                },
                TestReport {
                    index: 1,
                    name: "broken".to_string(),
                    status: TestStatus::Failed,
                    metrics: None,
                },
            ],
            summary: ReportSummary {
                total_tests: 2,
                completed: 1,
                failed: 1,
                skipped: 0,
                best_total_ms: Some(4.0),
                fastest: Some(0),
            },
        }
    }

    #[test]
    fn test_json_layout() {
        let json = generate_json_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["meta"]["schema_version"], 1);
        assert_eq!(value["tests"][0]["status"], "completed");
        assert_eq!(value["tests"][0]["metrics"]["is_best"], true);
        assert_eq!(value["tests"][1]["status"], "failed");
        assert!(value["tests"][1]["metrics"].is_null());
        assert_eq!(value["summary"]["fastest"], 0);
    }

    #[test]
    fn test_json_reads_back() {
        let json = generate_json_report(&report()).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.tests.len(), 2);
        assert_eq!(parsed.tests[1].status, TestStatus::Failed);
        assert_eq!(parsed.meta.config.inter_test_delay_ms, Some(50.0));
    }
}

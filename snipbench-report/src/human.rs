//! Human Output
//!
//! Terminal-friendly rendering of a [`Report`]:
//! - One line per test in suite order with a status icon (✓/✗/⊘)
//! - Timing metrics for completed tests
//! - Comparison table, fastest first, with the ratio against the best total

use crate::format_duration;
use crate::report::{Report, TestReport, TestStatus};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    if report.meta.description.is_empty() {
        output.push_str("snipbench Results\n");
    } else {
        output.push_str(&format!("snipbench Results: {}\n", report.meta.description));
    }
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for test in &report.tests {
        let status_icon = match test.status {
            TestStatus::Completed => "✓",
            TestStatus::Failed => "✗",
            TestStatus::Skipped => "⊘",
        };
        output.push_str(&format!("  {} {}\n", status_icon, test.name));

        match (&test.metrics, test.status) {
            (Some(metrics), _) => {
                output.push_str(&format!(
                    "      total: {}  mean: {}  median: {}\n",
                    format_duration(metrics.total_ms),
                    format_duration(metrics.mean_ms),
                    format_duration(metrics.median_ms)
                ));
                output.push_str(&format!(
                    "      lowest: {}  highest: {}  samples: {}\n",
                    format_duration(metrics.lowest_ms),
                    format_duration(metrics.highest_ms),
                    metrics.samples
                ));
            }
            (None, TestStatus::Failed) => output.push_str("      error: candidate panicked\n"),
            (None, _) => output.push_str("      skipped\n"),
        }
        output.push('\n');
    }

    if report.tests.iter().filter(|t| t.metrics.is_some()).count() > 1 {
        output.push_str(&comparison_table(report));
    }

    let summary = &report.summary;
    output.push_str(&format!(
        "\n{} tests: {} completed, {} failed, {} skipped\n",
        summary.total_tests, summary.completed, summary.failed, summary.skipped
    ));

    output
}

/// Ratio cell: `1` for the best entry, `x.xx` otherwise, `error` when undefined
pub fn format_ratio(test: &TestReport) -> String {
    match &test.metrics {
        Some(m) if m.is_best => "1".to_string(),
        Some(m) => match m.relative {
            Some(r) if r.is_finite() => format!("{:.2}", r),
            _ => "error".to_string(),
        },
        None => "error".to_string(),
    }
}

fn comparison_table(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("Comparison\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');

    // Find max name length for alignment
    let width = report
        .tests
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(20)
        .max(4);

    output.push_str(&format!(
        "  {:<width$}  {:>12}  {:>8}\n",
        "Test",
        "Total",
        "Ratio",
        width = width
    ));
    output.push_str(&format!("  {}\n", "-".repeat(width + 24)));

    // Fastest first; undefined entries at the bottom in suite order
    let mut sorted: Vec<&TestReport> = report.tests.iter().collect();
    sorted.sort_by(|a, b| {
        let total = |t: &TestReport| t.metrics.as_ref().map(|m| m.total_ms);
        match (total(a), total(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.index.cmp(&b.index),
        }
    });

    for test in sorted {
        let total = test
            .metrics
            .as_ref()
            .map(|m| format_duration(m.total_ms))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {:<width$}  {:>12}  {:>8}\n",
            test.name,
            total,
            format_ratio(test),
            width = width
        ));
    }

    output
}

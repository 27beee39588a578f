//! Report Building
//!
//! Turns a published [`RunResult`] into a [`Report`] ready for output.
//!
//! ```text
//! TestSlot[] + RunResult
//!          │
//!          ▼
//!   ┌──────────────┐
//!   │ TestMetrics  │  Rayon-parallel, one per test
//!   └──────┬───────┘
//!          │
//!          ▼
//!   ┌──────────────┐
//!   │    Report    │  Ready for JSON/human output
//!   └──────────────┘
//! ```
//!
//! Medians need a sorted copy of every sample set, so metrics are computed
//! in parallel.

use crate::engine::RunOptions;
use crate::metadata::build_report_meta;
use rayon::prelude::*;
use snipbench_core::TestSlot;
use snipbench_report::{Report, ReportSummary, TestMetrics, TestReport, TestStatus};
use snipbench_stats::RunResult;

/// Build a complete Report from the slots of a run and its result.
///
/// A slot without a callable is reported as skipped. A ready slot with no
/// sample set failed during execution.
pub fn build_report(
    description: &str,
    slots: &[TestSlot],
    result: &RunResult,
    options: &RunOptions,
) -> Report {
    let metrics: Vec<Option<TestMetrics>> = (0..slots.len())
        .into_par_iter()
        .map(|i| {
            result.get(i).map(|set| TestMetrics {
                samples: set.len(),
                total_ms: set.total(),
                mean_ms: set.mean(),
                median_ms: set.median(),
                highest_ms: set.highest(),
                lowest_ms: set.lowest(),
                relative: result.relative(i).filter(|r| r.is_finite()),
                is_best: result.is_best(i),
            })
        })
        .collect();

    let mut summary = ReportSummary {
        total_tests: slots.len(),
        best_total_ms: result.best_total(),
        fastest: result.fastest(),
        ..Default::default()
    };

    let tests = slots
        .iter()
        .zip(metrics)
        .map(|(slot, metrics)| {
            let status = match (&metrics, slot.is_ready()) {
                (Some(_), _) => TestStatus::Completed,
                (None, true) => TestStatus::Failed,
                (None, false) => TestStatus::Skipped,
            };
            match status {
                TestStatus::Completed => summary.completed += 1,
                TestStatus::Failed => summary.failed += 1,
                TestStatus::Skipped => summary.skipped += 1,
            }
            TestReport {
                index: slot.index,
                name: slot.name.clone(),
                status,
                metrics,
            }
        })
        .collect();

    Report {
        meta: build_report_meta(description, options),
        tests,
        summary,
    }
}

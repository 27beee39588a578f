//! Output Sinks
//!
//! The engine never owns presentation state. It writes progress and results
//! to a [`RunSink`] and reports candidate failures to a [`DiagnosticSink`].

use snipbench_core::ExecutionError;
use snipbench_stats::RunResult;
use std::sync::Arc;
use tracing::error;

/// Receives run progress and completed results
pub trait RunSink: Send + Sync {
    /// Samples collected so far in the active run; `None` when idle
    fn set_progress(&self, progress: Option<u64>);

    /// A completed run's result. Called at most once per run.
    fn publish(&self, result: Arc<RunResult>);
}

/// Receives candidate execution failures
pub trait DiagnosticSink: Send + Sync {
    /// Test `test_index` panicked and was dropped from the run
    fn execution_failed(&self, test_index: usize, error: &ExecutionError);
}

/// Diagnostic sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn execution_failed(&self, test_index: usize, error: &ExecutionError) {
        error!(
            test_index,
            sample = error.sample,
            message = %error.message,
            "test execution failed"
        );
    }
}

//! Run Coordination
//!
//! Sequences sample collection over every test of a suite, strictly in index
//! order and never in parallel, so candidates do not contend for the CPU.
//!
//! ## Outcomes
//!
//! - **Nothing to run**: no test has a callable; no run id is minted.
//! - **Superseded**: a newer run started; nothing is published and progress
//!   is left to the newer run.
//! - **Completed**: every test was visited; the aggregated result is published.
//!
//! A panicking candidate only loses its own slot. The run continues with the
//! next test and the failure goes to the [`DiagnosticSink`].

use super::sink::{DiagnosticSink, TracingDiagnostics};
use super::supersession::{RunId, RunSupersession};
use snipbench_core::{Clock, CollectError, MonotonicClock, SampleCollector, TestSlot};
use snipbench_stats::{RunResult, aggregate};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Samples per test when nothing else is configured
pub const DEFAULT_AMOUNT: NonZeroU32 = NonZeroU32::new(100).unwrap();

/// Pause after each test when nothing else is configured
pub const DEFAULT_INTER_TEST_DELAY: Duration = Duration::from_millis(50);

/// Parameters for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Samples collected per test
    pub amount: NonZeroU32,
    /// Pause after every sample
    pub inter_sample_delay: Option<Duration>,
    /// Pause after every successfully measured test
    pub inter_test_delay: Option<Duration>,
}

impl RunOptions {
    /// Options taking `amount` samples per test with no delays
    pub fn new(amount: NonZeroU32) -> Self {
        Self {
            amount,
            inter_sample_delay: None,
            inter_test_delay: None,
        }
    }

    /// Set the pause after every sample
    pub fn with_inter_sample_delay(mut self, delay: Option<Duration>) -> Self {
        self.inter_sample_delay = delay;
        self
    }

    /// Set the pause after every measured test
    pub fn with_inter_test_delay(mut self, delay: Option<Duration>) -> Self {
        self.inter_test_delay = delay;
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            inter_sample_delay: None,
            inter_test_delay: Some(DEFAULT_INTER_TEST_DELAY),
        }
    }
}

/// How a run request ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// No test had a callable; nothing was started
    NothingToRun,
    /// A newer run took over before this one could publish
    Superseded,
    /// The run finished and its result was published
    Completed(Arc<RunResult>),
}

impl RunOutcome {
    /// Published result, if the run completed
    pub fn result(&self) -> Option<&Arc<RunResult>> {
        match self {
            RunOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }

    /// Whether the run completed and published
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

/// Drives runs over a suite's test slots
pub struct RunCoordinator {
    controller: Arc<RunSupersession>,
    clock: Arc<dyn Clock>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl RunCoordinator {
    /// Create a coordinator using the monotonic clock and `tracing` diagnostics
    pub fn new(controller: Arc<RunSupersession>) -> Self {
        Self {
            controller,
            clock: Arc::new(MonotonicClock::new()),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the diagnostic sink
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Controller gating this coordinator's writes
    pub fn controller(&self) -> &Arc<RunSupersession> {
        &self.controller
    }

    /// Measure every test in `tests` and publish the aggregated result
    pub async fn run(&self, tests: &[TestSlot], options: &RunOptions) -> RunOutcome {
        if !tests.iter().any(TestSlot::is_ready) {
            debug!(tests = tests.len(), "no test is ready, skipping run");
            return RunOutcome::NothingToRun;
        }

        let run_id = self.controller.begin_run();
        let mut progress = Progress::start(&self.controller, run_id);
        info!(
            run = %run_id,
            tests = tests.len(),
            amount = options.amount.get(),
            "starting run"
        );

        let collector = SampleCollector::new(self.clock.clone(), options.amount)
            .with_inter_sample_delay(options.inter_sample_delay);
        let inter_test_delay = options.inter_test_delay.filter(|d| !d.is_zero());
        let mut per_test = Vec::with_capacity(tests.len());

        for (position, slot) in tests.iter().enumerate() {
            if !self.controller.is_current(run_id) {
                debug!(run = %run_id, "superseded before test {}", slot.index);
                return RunOutcome::Superseded;
            }

            let Some(callable) = &slot.callable else {
                debug!(test = slot.index, "test not ready, skipping");
                per_test.push(None);
                continue;
            };

            let outcome = collector
                .collect(
                    callable,
                    || !self.controller.is_current(run_id),
                    |_| progress.advance(),
                )
                .await;

            match outcome {
                Ok(samples) => {
                    debug!(
                        test = slot.index,
                        total_ms = samples.total(),
                        "test measured"
                    );
                    per_test.push(Some(samples));

                    let has_next = position + 1 < tests.len();
                    if let Some(delay) = inter_test_delay.filter(|_| has_next) {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(CollectError::Cancelled) => {
                    debug!(run = %run_id, test = slot.index, "superseded during test");
                    return RunOutcome::Superseded;
                }
                Err(CollectError::Execution(error)) => {
                    self.diagnostics.execution_failed(slot.index, &error);
                    per_test.push(None);
                }
            }
        }

        match self.controller.publish(run_id, aggregate(per_test)) {
            Some(result) => {
                info!(run = %run_id, best_total_ms = ?result.best_total(), "run complete");
                RunOutcome::Completed(result)
            }
            None => RunOutcome::Superseded,
        }
    }
}

/// Per-run progress counter that goes quiet once the run is stale
struct Progress<'a> {
    controller: &'a RunSupersession,
    run_id: RunId,
    count: u64,
    live: bool,
}

impl<'a> Progress<'a> {
    fn start(controller: &'a RunSupersession, run_id: RunId) -> Self {
        let live = controller.report_progress(run_id, 0);
        Self {
            controller,
            run_id,
            count: 0,
            live,
        }
    }

    fn advance(&mut self) {
        if !self.live {
            return;
        }
        self.count += 1;
        self.live = self.controller.report_progress(self.run_id, self.count);
    }
}

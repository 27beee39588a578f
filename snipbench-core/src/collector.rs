//! Sample Collector
//!
//! Runs one candidate a fixed number of times and records one wall-clock
//! sample per call. A collection either completes with every sample or
//! reports why it stopped. Partial sets never leave this module.
//!
//! Candidate panics are caught and returned as [`ExecutionError`]s. Call
//! [`silence_candidate_panics`] once to keep the default panic hook from
//! also printing them to stderr.
//!
//! ```text
//!   for each sample:
//!     clock → call candidate → clock     (panic ⇒ Execution error)
//!     record sample
//!     is_cancelled()?                    (true ⇒ Cancelled)
//!     on_sample(n)
//!     sleep(inter_sample_delay)          (only if positive)
//!     is_cancelled()?
//! ```

use crate::Callable;
use crate::measure::{Clock, Timer, checked_duration};
use snipbench_stats::{SampleSet, SampleSetBuilder};
use std::any::Any;
use std::cell::Cell;
use std::num::NonZeroU32;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Once};
use std::time::Duration;
use thiserror::Error;
use tracing::{trace, warn};

/// A candidate panicked while being measured
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("candidate panicked on sample {sample}: {message}")]
pub struct ExecutionError {
    /// One-based number of the sample that failed
    pub sample: u32,
    /// Panic payload rendered as text
    pub message: String,
}

/// Why a collection stopped without producing a [`SampleSet`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectError {
    /// A newer run superseded the one this collection belongs to
    #[error("collection cancelled")]
    Cancelled,
    /// The candidate panicked; the whole collection is abandoned
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

thread_local! {
    static IN_CANDIDATE: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is inside a measured candidate call
pub fn in_candidate() -> bool {
    IN_CANDIDATE.with(Cell::get)
}

/// Keep candidate panics out of the panic hook.
///
/// Panics raised while a candidate is being measured are skipped; every
/// other panic still reaches the previously installed hook. Installing more
/// than once is a no-op.
pub fn silence_candidate_panics() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if !in_candidate() {
                previous(info);
            }
        }));
    });
}

/// Collects a fixed number of timing samples from one callable
pub struct SampleCollector {
    clock: Arc<dyn Clock>,
    amount: NonZeroU32,
    inter_sample_delay: Option<Duration>,
}

impl SampleCollector {
    /// Create a collector taking `amount` samples per candidate
    pub fn new(clock: Arc<dyn Clock>, amount: NonZeroU32) -> Self {
        Self {
            clock,
            amount,
            inter_sample_delay: None,
        }
    }

    /// Pause for `delay` after every sample. Zero disables the pause.
    pub fn with_inter_sample_delay(mut self, delay: Option<Duration>) -> Self {
        self.inter_sample_delay = delay.filter(|d| !d.is_zero());
        self
    }

    /// Samples taken per collection
    pub fn amount(&self) -> u32 {
        self.amount.get()
    }

    /// Run `callable` until every sample is collected.
    ///
    /// `is_cancelled` is consulted after each sample and after each
    /// inter-sample delay. `on_sample` receives the one-based number of each
    /// sample once it is recorded and the run is still live.
    pub async fn collect<C, S>(
        &self,
        callable: &Callable,
        is_cancelled: C,
        mut on_sample: S,
    ) -> Result<SampleSet, CollectError>
    where
        C: Fn() -> bool,
        S: FnMut(u32),
    {
        let amount = self.amount.get();
        let mut samples = SampleSetBuilder::new(self.measure(callable, 1)?, amount as usize);
        self.settle(1, &is_cancelled, &mut on_sample).await?;

        for sample in 2..=amount {
            samples.push(self.measure(callable, sample)?);
            self.settle(sample, &is_cancelled, &mut on_sample).await?;
        }

        Ok(samples.finish())
    }

    /// Cancellation checks, progress and pause after a recorded sample
    async fn settle<C, S>(
        &self,
        sample: u32,
        is_cancelled: &C,
        on_sample: &mut S,
    ) -> Result<(), CollectError>
    where
        C: Fn() -> bool,
        S: FnMut(u32),
    {
        if is_cancelled() {
            return Err(CollectError::Cancelled);
        }
        on_sample(sample);

        if let Some(delay) = self.inter_sample_delay {
            tokio::time::sleep(delay).await;
            if is_cancelled() {
                return Err(CollectError::Cancelled);
            }
        }
        Ok(())
    }

    /// Time a single call
    fn measure(&self, callable: &Callable, sample: u32) -> Result<f64, ExecutionError> {
        IN_CANDIDATE.with(|flag| flag.set(true));
        let timer = Timer::start(self.clock.as_ref());
        let outcome = catch_unwind(AssertUnwindSafe(|| (**callable)()));
        let raw = timer.stop();
        IN_CANDIDATE.with(|flag| flag.set(false));

        if let Err(panic) = outcome {
            return Err(ExecutionError {
                sample,
                message: panic_message(panic.as_ref()),
            });
        }

        match checked_duration(raw) {
            Some(duration) => {
                trace!(sample, duration_ms = duration, "sample recorded");
                Ok(duration)
            }
            None => {
                warn!(sample, raw_ms = raw, "clock anomaly, clamping sample to 0");
                Ok(0.0)
            }
        }
    }
}

/// Render a panic payload as text
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

//! Run Supersession
//!
//! Only the most recently requested run may write progress or results.
//! Every run gets an id from a generation counter; an id goes stale the
//! instant a newer one is minted. Staleness is the only cancellation signal.
//!
//! Writes check the generation and write through to the sink while holding
//! one gate, so a concurrent [`RunSupersession::begin_run`] can never slip
//! between the check and the write.

use super::sink::RunSink;
use snipbench_stats::RunResult;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Identity of one run request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    /// Raw generation value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Gatekeeper deciding which run may publish
pub struct RunSupersession {
    generation: AtomicU64,
    gate: Mutex<()>,
    sink: Arc<dyn RunSink>,
}

impl RunSupersession {
    /// Create a controller writing to `sink`
    pub fn new(sink: Arc<dyn RunSink>) -> Self {
        Self {
            generation: AtomicU64::new(0),
            gate: Mutex::new(()),
            sink,
        }
    }

    /// Mint a new run id, making every earlier id stale
    pub fn begin_run(&self) -> RunId {
        let _gate = self.lock();
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(run = id, "run started");
        RunId(id)
    }

    /// Most recently minted id
    pub fn current(&self) -> RunId {
        RunId(self.generation.load(Ordering::SeqCst))
    }

    /// Whether `id` is still the most recent run
    pub fn is_current(&self, id: RunId) -> bool {
        self.generation.load(Ordering::SeqCst) == id.0
    }

    /// Write `count` as the live progress if `id` is current.
    ///
    /// Returns `false` once the run is stale; nothing is written then.
    pub fn report_progress(&self, id: RunId, count: u64) -> bool {
        let _gate = self.lock();
        if !self.is_current(id) {
            return false;
        }
        self.sink.set_progress(Some(count));
        true
    }

    /// Publish `result` and reset progress to idle if `id` is current.
    ///
    /// A stale result is dropped silently and `None` is returned.
    pub fn publish(&self, id: RunId, result: RunResult) -> Option<Arc<RunResult>> {
        let _gate = self.lock();
        if !self.is_current(id) {
            debug!(run = id.0, "dropping stale result");
            return None;
        }

        let result = Arc::new(result);
        self.sink.publish(result.clone());
        self.sink.set_progress(None);
        Some(result)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for RunSupersession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunSupersession")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

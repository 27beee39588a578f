//! Run Board
//!
//! Reference [`RunSink`] backed by `tokio::sync::watch` channels. Readers can
//! poll the latest values or subscribe to changes, which is how the CLI feeds
//! its progress bar.

use super::sink::RunSink;
use snipbench_stats::RunResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Shared state written by the engine and read by presentation layers
#[derive(Debug)]
pub struct RunBoard {
    progress: watch::Sender<Option<u64>>,
    result: watch::Sender<Option<Arc<RunResult>>>,
    publications: AtomicU64,
}

impl RunBoard {
    /// Create an idle board with no result
    pub fn new() -> Self {
        let (progress, _) = watch::channel(None);
        let (result, _) = watch::channel(None);
        Self {
            progress,
            result,
            publications: AtomicU64::new(0),
        }
    }

    /// Samples collected so far in the active run; `None` when idle
    pub fn progress(&self) -> Option<u64> {
        *self.progress.borrow()
    }

    /// Most recently published result
    pub fn latest_result(&self) -> Option<Arc<RunResult>> {
        self.result.borrow().clone()
    }

    /// Number of results published so far
    pub fn publications(&self) -> u64 {
        self.publications.load(Ordering::SeqCst)
    }

    /// Watch progress changes
    pub fn subscribe_progress(&self) -> watch::Receiver<Option<u64>> {
        self.progress.subscribe()
    }

    /// Watch published results
    pub fn subscribe_results(&self) -> watch::Receiver<Option<Arc<RunResult>>> {
        self.result.subscribe()
    }
}

impl Default for RunBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSink for RunBoard {
    fn set_progress(&self, progress: Option<u64>) {
        self.progress.send_replace(progress);
    }

    fn publish(&self, result: Arc<RunResult>) {
        self.result.send_replace(Some(result));
        self.publications.fetch_add(1, Ordering::SeqCst);
    }
}

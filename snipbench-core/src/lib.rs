#![warn(missing_docs)]
//! snipbench Core - Sample Collection
//!
//! This crate provides the measurement side of the engine:
//! - [`TestSlot`]: one candidate, identified by position, possibly not ready
//! - [`SampleCollector`]: runs one candidate N times and records wall-clock samples
//! - [`Clock`] / [`MonotonicClock`]: injectable high-resolution time source
//!
//! Candidates are plain zero-argument closures. A panic inside a candidate
//! is caught and reported as an [`ExecutionError`].

mod collector;
mod measure;

pub use collector::{
    CollectError, ExecutionError, SampleCollector, in_candidate, silence_candidate_panics,
};
pub use measure::{Clock, MonotonicClock, Timer, checked_duration};

use std::fmt;
use std::sync::Arc;

/// A compiled, invocable candidate
pub type Callable = Arc<dyn Fn() + Send + Sync>;

/// One benchmark candidate.
///
/// `index` is only stable within one run: removing a test shifts every later
/// index down.
#[derive(Clone)]
pub struct TestSlot {
    /// Position of this test in the suite
    pub index: usize,
    /// Display label
    pub name: String,
    /// Compiled candidate; `None` when not ready or compilation failed
    pub callable: Option<Callable>,
}

impl TestSlot {
    /// Create a slot with the default `Test {index}` label
    pub fn new(index: usize, callable: Option<Callable>) -> Self {
        Self {
            index,
            name: format!("Test {index}"),
            callable,
        }
    }

    /// Create a slot with an explicit label
    pub fn named(index: usize, name: impl Into<String>, callable: Option<Callable>) -> Self {
        Self {
            index,
            name: name.into(),
            callable,
        }
    }

    /// Create a ready slot from a closure
    pub fn from_fn<F>(index: usize, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(index, Some(Arc::new(f)))
    }

    /// Whether this slot holds a callable
    pub fn is_ready(&self) -> bool {
        self.callable.is_some()
    }
}

impl fmt::Debug for TestSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSlot")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Supplies the current compiled candidates.
///
/// Re-read at the start of every run; the provider owns recompilation.
pub trait TestProvider {
    /// Snapshot of the candidates in index order
    fn slots(&self) -> Vec<TestSlot>;
}

impl TestProvider for [TestSlot] {
    fn slots(&self) -> Vec<TestSlot> {
        self.to_vec()
    }
}

impl TestProvider for Vec<TestSlot> {
    fn slots(&self) -> Vec<TestSlot> {
        self.clone()
    }
}

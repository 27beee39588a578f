//! Benchmark Suites
//!
//! A [`Suite`] is the in-memory list of candidates a user is comparing. It
//! plays the compiled-test provider role: every run takes a fresh snapshot
//! of its slots, so replacing or removing a candidate between runs is safe.

use snipbench_core::{Callable, TestProvider, TestSlot};
use std::sync::Arc;

#[derive(Clone)]
struct Candidate {
    name: String,
    callable: Option<Callable>,
}

/// Named collection of benchmark candidates
#[derive(Clone, Default)]
pub struct Suite {
    description: String,
    candidates: Vec<Candidate>,
}

impl Suite {
    /// Create an empty suite
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            candidates: Vec::new(),
        }
    }

    /// Append a ready candidate (builder style)
    pub fn candidate<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.push(name, Some(Arc::new(f)));
        self
    }

    /// Append a candidate, ready or not, and return its index
    pub fn push(&mut self, name: impl Into<String>, callable: Option<Callable>) -> usize {
        self.candidates.push(Candidate {
            name: name.into(),
            callable,
        });
        self.candidates.len() - 1
    }

    /// Replace the callable at `index`, e.g. after recompilation.
    ///
    /// Returns `false` if there is no candidate at `index`.
    pub fn set_callable(&mut self, index: usize, callable: Option<Callable>) -> bool {
        match self.candidates.get_mut(index) {
            Some(candidate) => {
                candidate.callable = callable;
                true
            }
            None => false,
        }
    }

    /// Remove the candidate at `index`, shifting later candidates down.
    ///
    /// Returns the removed candidate's name.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.candidates.len()).then(|| self.candidates.remove(index).name)
    }

    /// Suite description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Candidate names in index order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.name.as_str())
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the suite has no candidates
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl TestProvider for Suite {
    fn slots(&self) -> Vec<TestSlot> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(index, c)| TestSlot::named(index, c.name.clone(), c.callable.clone()))
            .collect()
    }
}

//! Run Aggregation
//!
//! Reduces the per-test sample sets of one run into a [`RunResult`] that can
//! be compared across candidates. The fastest candidate (lowest total) is the
//! normalization baseline for every relative figure.

use crate::sample_set::SampleSet;

/// Outcome of one complete pass over all tests.
///
/// `per_test[i]` is `None` when test `i` had no callable or failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    per_test: Vec<Option<SampleSet>>,
    best_total: Option<f64>,
}

impl RunResult {
    /// Per-test sample sets in index order
    pub fn per_test(&self) -> &[Option<SampleSet>] {
        &self.per_test
    }

    /// Sample set for test `index`, if it produced one
    pub fn get(&self, index: usize) -> Option<&SampleSet> {
        self.per_test.get(index).and_then(Option::as_ref)
    }

    /// Number of test positions in this run
    pub fn len(&self) -> usize {
        self.per_test.len()
    }

    /// Whether the run covered no tests at all
    pub fn is_empty(&self) -> bool {
        self.per_test.is_empty()
    }

    /// Lowest total among defined entries
    pub fn best_total(&self) -> Option<f64> {
        self.best_total
    }

    /// Index of the first test whose total equals the best total
    pub fn fastest(&self) -> Option<usize> {
        let best = self.best_total?;
        self.per_test
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| s.total() == best))
    }

    /// Whether test `index` holds the best total
    pub fn is_best(&self, index: usize) -> bool {
        match (self.get(index), self.best_total) {
            (Some(set), Some(best)) => set.total() == best,
            _ => false,
        }
    }

    /// Total of test `index` relative to the best total.
    ///
    /// The best entry is exactly `1.0`. Returns `None` for tests without a
    /// result or when no test produced one.
    pub fn relative(&self, index: usize) -> Option<f64> {
        let set = self.get(index)?;
        let best = self.best_total?;

        if set.total() == best {
            Some(1.0)
        } else if best == 0.0 {
            Some(f64::INFINITY)
        } else {
            Some(set.total() / best)
        }
    }
}

/// Combine per-test sample sets into a [`RunResult`]
pub fn aggregate(per_test: Vec<Option<SampleSet>>) -> RunResult {
    let best_total = per_test
        .iter()
        .flatten()
        .map(SampleSet::total)
        .min_by(|a, b| a.total_cmp(b));

    RunResult {
        per_test,
        best_total,
    }
}

//! Sample Sets
//!
//! A [`SampleSet`] is the complete measurement output for one test within one
//! run. It is only ever built from a non-empty sequence of samples, so every
//! published set satisfies:
//! - `lowest <= median <= highest`
//! - `total == sum(times)`
//! - `len() >= 1`
//!
//! Extremes and the total are tracked while samples arrive (see
//! [`SampleSetBuilder`]); the median is derived on demand from a sorted copy.

use thiserror::Error;

/// Returned when a sample set would contain no samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sample set must contain at least one sample")]
pub struct EmptySampleSet;

/// Timing samples for one test, in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    times: Vec<f64>,
    total: f64,
    highest: f64,
    lowest: f64,
}

impl SampleSet {
    /// Build a set from raw sample times.
    ///
    /// Negative and non-finite values are clamped to zero so that they can
    /// never corrupt `lowest` or `total`.
    pub fn from_times(times: impl IntoIterator<Item = f64>) -> Result<Self, EmptySampleSet> {
        let mut iter = times.into_iter();
        let first = iter.next().ok_or(EmptySampleSet)?;
        let mut builder = SampleSetBuilder::new(first, iter.size_hint().0 + 1);
        for time in iter {
            builder.push(time);
        }
        Ok(builder.finish())
    }

    /// Samples in collection order
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of samples (always at least one)
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sum of all samples
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Slowest sample
    pub fn highest(&self) -> f64 {
        self.highest
    }

    /// Fastest sample
    pub fn lowest(&self) -> f64 {
        self.lowest
    }

    /// Arithmetic mean of all samples
    pub fn mean(&self) -> f64 {
        self.total / self.times.len() as f64
    }

    /// Middle element of the sorted samples.
    ///
    /// For an even number of samples this is the mean of the two middle
    /// elements, which always lies between them.
    pub fn median(&self) -> f64 {
        let mut sorted = self.times.clone();
        sorted.sort_by(f64::total_cmp);

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }
}

/// Incremental accumulator used while a collection is in progress.
///
/// Starts from the first sample, so it can never seal an empty set. Tracks
/// the running total and extremes so the collector never has to walk the
/// samples twice.
#[derive(Debug, Clone)]
pub struct SampleSetBuilder {
    times: Vec<f64>,
    total: f64,
    highest: f64,
    lowest: f64,
}

impl SampleSetBuilder {
    /// Start a builder from `first`, with room for `capacity` samples
    pub fn new(first: f64, capacity: usize) -> Self {
        let mut builder = Self {
            times: Vec::with_capacity(capacity.max(1)),
            total: 0.0,
            highest: 0.0,
            lowest: f64::INFINITY,
        };
        builder.push(first);
        builder
    }

    /// Record one sample
    #[inline]
    pub fn push(&mut self, time: f64) {
        let time = if time.is_finite() && time > 0.0 { time } else { 0.0 };

        self.total += time;
        if time > self.highest {
            self.highest = time;
        }
        if time < self.lowest {
            self.lowest = time;
        }
        self.times.push(time);
    }

    /// Seal the builder into a [`SampleSet`]
    pub fn finish(self) -> SampleSet {
        SampleSet {
            times: self.times,
            total: self.total,
            highest: self.highest,
            lowest: self.lowest,
        }
    }
}

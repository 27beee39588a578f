#![warn(missing_docs)]
//! snipbench Statistics
//!
//! Descriptive aggregates for benchmark runs:
//! - [`SampleSet`]: one test's samples with total, mean, median and extremes
//! - [`aggregate`]: reduces a run's per-test sets into a comparable [`RunResult`]
//!
//! No confidence intervals or outlier trimming; every sample counts.

mod aggregate;
mod sample_set;

pub use aggregate::{RunResult, aggregate};
pub use sample_set::{EmptySampleSet, SampleSet, SampleSetBuilder};

//! Run Planner
//!
//! Selects which tests of a suite take part in a run.
//!
//! Filtering is a regex match on the test name. Tests that do not match are
//! kept as not-ready slots rather than dropped, so every test keeps its
//! position in the output.

use regex::Regex;
use snipbench_core::TestSlot;

/// Slots for one run
pub struct ExecutionPlan {
    /// Every test in index order; filtered-out tests carry no callable
    pub slots: Vec<TestSlot>,
    /// Number of selected tests that have a callable
    pub selected: usize,
}

/// Build a plan from a provider snapshot
pub fn build_plan(slots: Vec<TestSlot>, filter: Option<&Regex>) -> ExecutionPlan {
    let slots: Vec<TestSlot> = slots
        .into_iter()
        .map(|mut slot| {
            if let Some(re) = filter {
                if !re.is_match(&slot.name) {
                    slot.callable = None;
                }
            }
            slot
        })
        .collect();

    let selected = slots.iter().filter(|s| s.is_ready()).count();

    ExecutionPlan { slots, selected }
}

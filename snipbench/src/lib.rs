#![warn(missing_docs)]
//! # snipbench
//!
//! Micro-benchmark harness that compares candidate snippets against the
//! fastest one.
//!
//! - **Fixed sample counts**: every candidate is timed the same number of times
//! - **Sequential runs**: candidates never compete for the CPU
//! - **Failure isolation**: a panicking candidate loses its own result only
//! - **Supersession**: starting a new run silently retires the one in flight
//! - **Relative figures**: every total is normalized against the best total
//!
//! ## Quick Start
//!
//! ```ignore
//! use snipbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let suite = Suite::new("summing")
//!         .candidate("iter().sum()", || { /* ... */ })
//!         .candidate("fold", || { /* ... */ });
//!     snipbench::run(suite)
//! }
//! ```
//!
//! ## Embedding the Engine
//!
//! ```ignore
//! let board = Arc::new(RunBoard::new());
//! let controller = Arc::new(RunSupersession::new(board.clone()));
//! let coordinator = RunCoordinator::new(controller);
//!
//! let outcome = coordinator.run(&suite.slots(), &RunOptions::default()).await;
//! ```

// Re-export core types
pub use snipbench_core::{
    Callable, Clock, CollectError, ExecutionError, MonotonicClock, SampleCollector, TestProvider,
    TestSlot,
};

// Re-export stats
pub use snipbench_stats::{RunResult, SampleSet, aggregate};

// Re-export engine and harness
pub use snipbench_runner::{
    Cli, DiagnosticSink, RunBoard, RunCoordinator, RunId, RunOptions, RunOutcome, RunSink,
    RunSupersession, SnipConfig, Suite, TracingDiagnostics, build_report, run, run_with_cli,
};

// Re-export report
pub use snipbench_report::{OutputFormat, Report, TestStatus};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        RunBoard, RunCoordinator, RunOptions, RunOutcome, RunSupersession, Suite, TestProvider,
        TestSlot,
    };
    pub use std::hint::black_box;
    pub use std::sync::Arc;
}

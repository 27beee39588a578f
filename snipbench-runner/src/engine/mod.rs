//! Benchmark Engine
//!
//! Runs a suite's tests and publishes comparable results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! TestSlot[] (from a TestProvider)
//!       │
//!       ▼
//! ┌──────────────┐
//! │ supersession │  Mint run id; older runs go stale
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │ coordinator  │  Tests in index order → SampleCollector
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  aggregate   │  Best total across tests
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    sink      │  Publish only if the run is still current
//! └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`coordinator`] - Sequential run over all tests, failure isolation
//! - [`supersession`] - Run ids and gated publication
//! - [`sink`] - Progress/result and diagnostic outputs
//! - [`board`] - Watch-channel backed reference sink

mod board;
mod coordinator;
mod sink;
mod supersession;

pub use board::RunBoard;
pub use coordinator::{
    DEFAULT_AMOUNT, DEFAULT_INTER_TEST_DELAY, RunCoordinator, RunOptions, RunOutcome,
};
pub use sink::{DiagnosticSink, RunSink, TracingDiagnostics};
pub use supersession::{RunId, RunSupersession};

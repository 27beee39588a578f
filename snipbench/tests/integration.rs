//! Integration tests for snipbench
//!
//! These tests verify the end-to-end behavior of the engine across crates.

use snipbench::{
    Clock, DiagnosticSink, ExecutionError, RunBoard, RunCoordinator, RunOptions, RunOutcome,
    RunResult, RunSupersession, Suite, TestProvider, TestSlot,
};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecordingDiagnostics {
    failures: Mutex<Vec<(usize, ExecutionError)>>,
}

impl DiagnosticSink for RecordingDiagnostics {
    fn execution_failed(&self, test_index: usize, error: &ExecutionError) {
        self.failures
            .lock()
            .unwrap()
            .push((test_index, error.clone()));
    }
}

/// Advances 1ms per reading so every sample lasts exactly 1ms
#[derive(Default)]
struct StepClock {
    ticks: AtomicU64,
}

impl Clock for StepClock {
    fn now_ms(&self) -> f64 {
        self.ticks.fetch_add(1, Ordering::SeqCst) as f64
    }
}

struct Engine {
    board: Arc<RunBoard>,
    diagnostics: Arc<RecordingDiagnostics>,
    coordinator: Arc<RunCoordinator>,
}

fn engine() -> Engine {
    let board = Arc::new(RunBoard::new());
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let controller = Arc::new(RunSupersession::new(board.clone()));
    let coordinator =
        Arc::new(RunCoordinator::new(controller).with_diagnostics(diagnostics.clone()));
    Engine {
        board,
        diagnostics,
        coordinator,
    }
}

fn options(amount: u32) -> RunOptions {
    RunOptions::new(NonZeroU32::new(amount).unwrap())
}

async fn completed(engine: &Engine, slots: &[TestSlot], opts: &RunOptions) -> Arc<RunResult> {
    match engine.coordinator.run(slots, opts).await {
        RunOutcome::Completed(result) => result,
        other => panic!("expected a completed run, got {other:?}"),
    }
}

/// A successful test yields exactly `amount` samples
#[tokio::test]
async fn test_sample_count_matches_amount() {
    let e = engine();
    for amount in [1, 7, 32] {
        let result = completed(&e, &[TestSlot::from_fn(0, || {})], &options(amount)).await;
        assert_eq!(result.get(0).unwrap().len(), amount as usize);
    }
}

/// Extremes bound every sample and the total is their sum
#[tokio::test]
async fn test_sample_set_bounds_and_total() {
    let e = engine();
    let slots = [TestSlot::from_fn(0, || {
        std::hint::black_box((0..500u64).product::<u64>());
    })];

    let result = completed(&e, &slots, &options(25)).await;
    let set = result.get(0).unwrap();

    assert!(set.times().iter().all(|&t| set.lowest() <= t && t <= set.highest()));
    let sum: f64 = set.times().iter().sum();
    assert!((set.total() - sum).abs() < 1e-9);
}

/// The best total is the lowest defined total
#[tokio::test]
async fn test_best_total_is_minimum() {
    let e = engine();
    let slots = [
        TestSlot::from_fn(0, || std::thread::sleep(Duration::from_micros(200))),
        TestSlot::from_fn(1, || {}),
        TestSlot::new(2, None),
    ];

    let result = completed(&e, &slots, &options(5)).await;

    let min = result
        .per_test()
        .iter()
        .flatten()
        .map(|s| s.total())
        .fold(f64::INFINITY, f64::min);
    assert_eq!(result.best_total(), Some(min));
    assert_eq!(result.fastest(), Some(1));
    assert_eq!(result.relative(1), Some(1.0));
    assert!(result.relative(0).unwrap() > 1.0);
    assert_eq!(result.relative(2), None);
}

/// A newer run retires the one in flight; only the newer run publishes
#[tokio::test(start_paused = true)]
async fn test_second_run_supersedes_first() {
    let e = engine();
    let slots = vec![TestSlot::from_fn(0, || {}), TestSlot::from_fn(1, || {})];
    let slow = options(50).with_inter_sample_delay(Some(Duration::from_millis(5)));

    let first = {
        let coordinator = e.coordinator.clone();
        let slots = slots.clone();
        tokio::spawn(async move { coordinator.run(&slots, &slow).await })
    };
    tokio::time::sleep(Duration::from_millis(12)).await;

    let mut results = e.board.subscribe_results();
    let second = e.coordinator.run(&slots, &options(3)).await;
    let first = first.await.unwrap();

    assert!(matches!(first, RunOutcome::Superseded));
    assert!(second.is_completed());
    assert_eq!(e.board.publications(), 1);
    assert_eq!(e.board.progress(), None);

    assert!(results.has_changed().unwrap());
    let published = results.borrow_and_update().clone().unwrap();
    assert_eq!(published.get(0).unwrap().len(), 3);
}

/// A run retired during its inter-test pause never starts the next test
#[tokio::test(start_paused = true)]
async fn test_superseded_between_tests() {
    let e = engine();
    let stale_calls = Arc::new(AtomicU32::new(0));
    let counter = stale_calls.clone();
    let first_slots = vec![
        TestSlot::from_fn(0, || {}),
        TestSlot::from_fn(1, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    ];
    let paused = options(3).with_inter_test_delay(Some(Duration::from_millis(100)));

    let first = {
        let coordinator = e.coordinator.clone();
        tokio::spawn(async move { coordinator.run(&first_slots, &paused).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(e.board.progress(), Some(3));

    let second_slots = [TestSlot::from_fn(0, || {}), TestSlot::from_fn(1, || {})];
    let second = e.coordinator.run(&second_slots, &options(2)).await;
    let first = first.await.unwrap();

    assert!(matches!(first, RunOutcome::Superseded));
    assert!(second.is_completed());
    assert_eq!(stale_calls.load(Ordering::SeqCst), 0);
    assert_eq!(e.board.publications(), 1);
    assert_eq!(e.board.progress(), None);
}

/// A panic on the 3rd of 10 calls only removes that test's result
#[tokio::test]
async fn test_panic_mid_collection_isolated() {
    let e = engine();
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let slots = [
        TestSlot::from_fn(0, || {}),
        TestSlot::from_fn(1, move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 2 {
                panic!("third call");
            }
        }),
        TestSlot::from_fn(2, || {}),
    ];

    let result = completed(&e, &slots, &options(10)).await;

    assert_eq!(result.get(0).unwrap().len(), 10);
    assert!(result.get(1).is_none());
    assert_eq!(result.get(2).unwrap().len(), 10);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let failures = e.diagnostics.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 1);
    assert_eq!(failures[0].1.message, "third call");
}

/// Mixed ready and not-ready slots keep their positions
#[tokio::test]
async fn test_mixed_ready_slots() {
    let e = engine();
    let mut suite = Suite::new("mixed")
        .candidate("a", || {})
        .candidate("b", || {});
    suite.push("c", None);

    let result = completed(&e, &suite.slots(), &options(5)).await;

    assert_eq!(result.len(), 3);
    assert_eq!(result.get(0).unwrap().len(), 5);
    assert_eq!(result.get(1).unwrap().len(), 5);
    assert!(result.get(2).is_none());

    let best = result.get(0).unwrap().total().min(result.get(1).unwrap().total());
    assert_eq!(result.best_total(), Some(best));
}

/// A single always-panicking test leaves nothing defined
#[tokio::test]
async fn test_single_failing_test() {
    let e = engine();
    let slots = [TestSlot::from_fn(0, || panic!("always"))];

    let result = completed(&e, &slots, &options(10)).await;

    assert_eq!(result.len(), 1);
    assert!(result.get(0).is_none());
    assert_eq!(result.best_total(), None);
    assert_eq!(e.diagnostics.failures.lock().unwrap().len(), 1);
}

/// Identical inputs give the same shape on every run
#[tokio::test]
async fn test_rerun_is_stable() {
    let e = engine();
    let suite = Suite::new("stable")
        .candidate("ok", || {})
        .candidate("bad", || panic!("bad"))
        .candidate("ok too", || {});

    let first = completed(&e, &suite.slots(), &options(4)).await;
    let second = completed(&e, &suite.slots(), &options(4)).await;

    let shape = |r: &RunResult| -> Vec<Option<usize>> {
        r.per_test().iter().map(|s| s.as_ref().map(|s| s.len())).collect()
    };
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(e.board.publications(), 2);
}

/// A deterministic clock makes totals exact
#[tokio::test]
async fn test_injected_clock() {
    let board = Arc::new(RunBoard::new());
    let controller = Arc::new(RunSupersession::new(board.clone()));
    let coordinator =
        RunCoordinator::new(controller).with_clock(Arc::new(StepClock::default()));

    let slots = [TestSlot::from_fn(0, || {}), TestSlot::from_fn(1, || {})];
    let outcome = coordinator.run(&slots, &options(6)).await;
    let result = outcome.result().unwrap();

    assert_eq!(result.get(0).unwrap().total(), 6.0);
    assert_eq!(result.get(1).unwrap().total(), 6.0);
    assert_eq!(result.best_total(), Some(6.0));
    assert!(result.is_best(0) && result.is_best(1));
    assert_eq!(board.latest_result().as_deref(), Some(result.as_ref()));
}

/// Nothing ready means nothing starts
#[tokio::test]
async fn test_nothing_to_run() {
    let e = engine();
    let outcome = e
        .coordinator
        .run(&[TestSlot::new(0, None)], &options(3))
        .await;

    assert!(matches!(outcome, RunOutcome::NothingToRun));
    assert_eq!(e.board.publications(), 0);
    assert!(e.board.latest_result().is_none());
}

//! Looping Functions Comparison
//!
//! Compares four ways of walking a 100 000 element array.
//!
//! Run with:
//!   cargo run --example array_loops                  # Run all candidates
//!   cargo run --example array_loops -- -n 20         # 20 samples per candidate
//!   cargo run --example array_loops -- --format json # JSON report
//!   cargo run --example array_loops -- list          # List candidates
//!   cargo run --example array_loops -- fold          # Run only matching candidates

use snipbench::prelude::*;

const LEN: usize = 100_000;

#[allow(clippy::needless_range_loop)]
fn main() -> anyhow::Result<()> {
    let data: Arc<Vec<u64>> = Arc::new((0..LEN as u64).collect());

    let suite = Suite::new("various looping functions")
        .candidate("for loop", {
            let data = data.clone();
            move || {
                let mut sum = 0u64;
                for i in 0..data.len() {
                    sum = sum.wrapping_add(data[i]);
                }
                black_box(sum);
            }
        })
        .candidate("for_each", {
            let data = data.clone();
            move || {
                let mut sum = 0u64;
                data.iter().for_each(|v| sum = sum.wrapping_add(*v));
                black_box(sum);
            }
        })
        .candidate("fold", {
            let data = data.clone();
            move || {
                black_box(data.iter().fold(0u64, |acc, v| acc.wrapping_add(*v)));
            }
        })
        .candidate("map", move || {
            let doubled: Vec<u64> = data.iter().map(|v| v * 2).collect();
            black_box(doubled);
        });

    snipbench::run(suite)
}

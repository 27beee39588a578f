//! System Metadata Collection
//!
//! Collects system information for report metadata.
//!
//! CPU model lookup reads `/proc/cpuinfo` and degrades to "Unknown" on
//! other platforms.

use crate::engine::RunOptions;
use chrono::Utc;
use snipbench_report::{REPORT_SCHEMA_VERSION, ReportConfig, ReportMeta, SystemInfo};

/// Build report metadata including system info and run parameters
pub fn build_report_meta(description: &str, options: &RunOptions) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
    };

    let as_ms = |d: std::time::Duration| d.as_secs_f64() * 1000.0;
    let config = ReportConfig {
        amount: options.amount.get(),
        inter_sample_delay_ms: options.inter_sample_delay.map(as_ms),
        inter_test_delay_ms: options.inter_test_delay.map(as_ms),
    };

    ReportMeta {
        schema_version: REPORT_SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        description: description.to_string(),
        system,
        config,
    }
}

/// Get CPU model name from /proc/cpuinfo (Linux only)
fn get_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("model name"))
                    .and_then(|l| l.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

//! High-Resolution Timing
//!
//! Samples are fractional milliseconds read from a [`Clock`]. The default
//! [`MonotonicClock`] is backed by `std::time::Instant`; any other clock can
//! be injected, which is how tests drive exact or misbehaving readings.

use std::time::Instant;

/// Source of high-resolution timestamps
pub trait Clock: Send + Sync {
    /// Current reading in milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock anchored at construction time
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

/// Timer for measuring a single sample
pub struct Timer<'a> {
    clock: &'a dyn Clock,
    start: f64,
}

impl<'a> Timer<'a> {
    /// Start a new timer
    #[inline(always)]
    pub fn start(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            start: clock.now_ms(),
        }
    }

    /// Stop the timer and return the raw difference in milliseconds.
    ///
    /// The value is unchecked; see [`checked_duration`].
    #[inline(always)]
    pub fn stop(&self) -> f64 {
        self.clock.now_ms() - self.start
    }
}

/// Validate a raw duration.
///
/// Returns `None` for negative or non-finite readings, which only a
/// misbehaving clock can produce.
#[inline]
pub fn checked_duration(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw >= 0.0).then_some(raw)
}

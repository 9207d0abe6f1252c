use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Monotonic time source, read as an offset from the clock's own epoch.
/// Abstracted so tests can drive the loop with synthetic time.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchResult {
    pub iterations: u64,
    pub elapsed: Duration,
}

impl BenchResult {
    /// Mean seconds per invocation. `run_timed` guarantees at least one
    /// iteration, so this never divides by zero.
    pub fn mean_secs(&self) -> f64 {
        self.elapsed.as_secs_f64() / self.iterations as f64
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} seconds per prime-finding, with {} iterations completed.",
            self.mean_secs(),
            self.iterations
        )
    }
}

/// Invoke `work` repeatedly until at least `window` has elapsed on `clock`.
///
/// The clock is re-read only after a full invocation returns, so the loop can
/// overshoot the window by up to one invocation but never cuts one short.
/// Return values are routed through `black_box` to keep the optimizer from
/// deleting the work, then dropped.
pub fn run_timed<C, F, R>(clock: &C, window: Duration, mut work: F) -> BenchResult
where
    C: Clock,
    F: FnMut() -> R,
{
    let start = clock.now();
    let mut iterations = 0u64;
    loop {
        black_box(work());
        iterations += 1;
        let elapsed = clock.now() - start;
        if elapsed >= window {
            return BenchResult {
                iterations,
                elapsed,
            };
        }
    }
}

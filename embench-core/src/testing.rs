//! Deterministic clocks for unit tests. Time only moves when a test calls
//! [`FakeClock::advance`]; state is per thread so tests can run in parallel.

use std::cell::Cell;

use embench_stats::Nanoseconds;

use crate::measure::Clock;

thread_local! {
    static NOW: Cell<f64> = const { Cell::new(0.0) };
}

/// Manually advanced clock with `f64` time points
pub struct FakeClock;

impl FakeClock {
    pub fn reset() {
        NOW.with(|now| now.set(0.0));
    }

    pub fn advance(by: f64) {
        NOW.with(|now| now.set(now.get() + by));
    }
}

impl Clock for FakeClock {
    type Instant = f64;
    type Duration = f64;

    fn now() -> f64 {
        NOW.with(Cell::get)
    }
}

/// Same timeline as [`FakeClock`], read as a duration-like wrapper
pub struct FakeNanosClock;

impl Clock for FakeNanosClock {
    type Instant = Nanoseconds;
    type Duration = Nanoseconds;

    fn now() -> Nanoseconds {
        Nanoseconds(FakeClock::now())
    }
}

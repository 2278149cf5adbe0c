//! Clocks
//!
//! A [`Clock`] is a stateless source of monotonic time points. Two readings
//! subtracted in call order give a non-negative duration; resolution and
//! whether it counts wall or CPU time is up to the adapter.
//!
//! Adapters:
//! - [`WallClock`]: `std::time::Instant` (requires `std`)
//! - [`CpuClock`]: process CPU time in microseconds (requires `std`, unix only)
//! - [`CycleClock`]: RDTSCP on x86_64, CNTVCT_EL0 on AArch64 (no `std` needed)

use core::ops::Sub;

/// Source of monotonic time points
pub trait Clock {
    /// Time point returned by [`Clock::now`]
    type Instant: Copy + Sub<Output = Self::Duration>;
    /// Difference of two time points
    type Duration;

    /// Read the current time point
    fn now() -> Self::Instant;
}

// ─── Wall clock ──────────────────────────────────────────────────────────────

/// Monotonic wall clock backed by `std::time::Instant`.
///
/// Durations are `std::time::Duration`; accumulate them as
/// [`Nanoseconds`](embench_stats::Nanoseconds) or plain `f64` nanoseconds.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

#[cfg(feature = "std")]
impl Clock for WallClock {
    type Instant = std::time::Instant;
    type Duration = std::time::Duration;

    #[inline(always)]
    fn now() -> Self::Instant {
        std::time::Instant::now()
    }
}

// ─── CPU time ────────────────────────────────────────────────────────────────

/// Process CPU time in microseconds, as `f64`.
///
/// Usually less noisy than wall time since time spent descheduled is not
/// counted, at the price of a coarser resolution on some platforms.
#[cfg(all(feature = "std", unix))]
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuClock;

#[cfg(all(feature = "std", unix))]
impl Clock for CpuClock {
    type Instant = f64;
    type Duration = f64;

    #[inline]
    fn now() -> f64 {
        // SAFETY: timespec is plain integers, all-zero is a valid value; `ts`
        // is writable and CLOCK_PROCESS_CPUTIME_ID is supported on every unix
        // we target.
        let (rc, ts) = unsafe {
            let mut ts: libc::timespec = std::mem::zeroed();
            let rc = libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts);
            (rc, ts)
        };
        debug_assert_eq!(rc, 0, "clock_gettime(CLOCK_PROCESS_CPUTIME_ID) failed");
        ts.tv_sec as f64 * 1_000_000.0 + ts.tv_nsec as f64 / 1_000.0
    }
}

// ─── Cycle counter ───────────────────────────────────────────────────────────

/// Read the CPU cycle/tick counter (platform-specific).
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles() -> u64 {
    // SAFETY: RDTSCP is available on all x86_64 CPUs since ~2006.
    // It waits for all prior instructions to complete before reading.
    unsafe {
        let mut _aux: u32 = 0;
        core::arch::x86_64::__rdtscp(&mut _aux)
    }
}

/// Read the virtual counter timer on AArch64 (comparable to x86 TSC).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on all AArch64 implementations
    // and increments monotonically at the system timer frequency.
    unsafe {
        core::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

/// Whether this platform provides [`CycleClock`].
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

/// Raw counter reading from [`CycleClock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cycles(pub u64);

impl Sub for Cycles {
    type Output = u64;

    /// Ticks between two readings; clamps to zero if the counter appears to
    /// run backwards (e.g. after a core migration).
    #[inline(always)]
    fn sub(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Hardware cycle/tick counter. Durations are raw `u64` ticks.
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleClock;

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
impl Clock for CycleClock {
    type Instant = Cycles;
    type Duration = u64;

    #[inline(always)]
    fn now() -> Cycles {
        Cycles(read_cycles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[cfg(feature = "std")]
    #[test]
    fn test_wall_clock_elapsed() {
        let start = WallClock::now();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = WallClock::now() - start;

        // Allow for coarse timers
        assert!(elapsed >= Duration::from_millis(5));
    }

    #[cfg(all(feature = "std", unix))]
    #[test]
    fn test_cpu_clock_advances_with_work() {
        let start = CpuClock::now();
        let mut acc = 0u64;
        for i in 0..5_000_000u64 {
            acc = acc.wrapping_add(crate::black_box(i));
        }
        crate::do_not_optimize(&acc);
        let elapsed = CpuClock::now() - start;

        assert!(elapsed >= 0.0);
    }

    #[test]
    fn test_cycles_saturate() {
        assert_eq!(Cycles(10) - Cycles(4), 6);
        assert_eq!(Cycles(4) - Cycles(10), 0);
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    #[test]
    fn test_cycle_counter() {
        let a = CycleClock::now();
        let b = CycleClock::now();
        assert!(b >= a, "cycle counter should be monotonic");
    }
}

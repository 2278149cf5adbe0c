#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs)]
//! EMBench Core - Measurement Engine
//!
//! This crate provides the execution environment for benchmarks:
//! - `Benchmarker`: append-only registry and sequential runner
//! - `State`: per-run iteration protocol with Welford running statistics
//! - `IterationTimer`: scoped guard timing exactly one iteration
//! - `Clock` / `Reporter` capabilities and the stock clocks
//! - Optimization barriers for benchmark bodies
//!
//! Everything except the wall and CPU clocks builds without `std` (only
//! `alloc` is needed for the registry), so suites can run on embedded targets
//! and report over any `core::fmt::Write` sink.

extern crate alloc;

mod hint;
mod measure;
mod reporter;
mod runner;
mod state;

#[cfg(test)]
mod testing;

pub use hint::{black_box, clobber_memory, do_not_optimize, do_not_optimize_mut};
#[cfg(all(feature = "std", unix))]
pub use measure::CpuClock;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
pub use measure::CycleClock;
#[cfg(feature = "std")]
pub use measure::WallClock;
pub use measure::{Clock, Cycles, HAS_CYCLE_COUNTER};
pub use reporter::{FmtReporter, Reporter, write_result_line};
pub use runner::{BenchmarkEntry, BenchmarkFn, Benchmarker, DEFAULT_ITERATIONS};
pub use state::{IterationTimer, State};

pub use embench_stats::{Accumulator, FromSample, Magnitude, Nanoseconds, Summary};

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
//! # EMBench
//!
//! Micro-benchmark harness for embedded and resource-constrained targets.
//!
//! - **Fixed iteration counts**: every benchmark runs exactly the number of
//!   iterations it was registered with, no warmup and no adaptive sampling
//! - **Single-pass statistics**: Welford's algorithm keeps mean and sample
//!   standard deviation without storing samples
//! - **Pluggable clocks**: wall clock, process CPU time, hardware cycle counter,
//!   or your own [`Clock`] reading a board timer
//! - **`no_std` core**: disable the `std` feature to build against `alloc` only
//!
//! ## Quick Start
//!
//! ```ignore
//! use embench::prelude::*;
//!
//! fn sum_loop(state: &mut State<WallClock, Nanoseconds>) {
//!     while let Some(_t) = state.next_iteration() {
//!         let mut sum = 0u64;
//!         for i in 0..1000 {
//!             sum += i;
//!         }
//!         do_not_optimize(&sum);
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     embench::run(|b: &mut Benchmarker<WallClock, Nanoseconds>| {
//!         benchmark!(b, sum_loop);
//!         benchmark!(b, sum_loop, 10);
//!     })
//! }
//! ```
//!
//! ## Without the CLI
//!
//! ```ignore
//! let mut b = Benchmarker::<MyTimer, f32>::with_default_iterations(100);
//! b.register("isr_latency", isr_latency);
//! b.run_benchmarks(&mut |name: &str, n: u64, mean: Option<f32>, sd: Option<f32>| {
//!     uart_log(name, n, mean, sd);
//! });
//! ```

// Re-export core types
pub use embench_core::{
    BenchmarkEntry, BenchmarkFn, Benchmarker, Clock, Cycles, DEFAULT_ITERATIONS, FmtReporter,
    HAS_CYCLE_COUNTER, IterationTimer, Reporter, State, black_box, clobber_memory,
    do_not_optimize, do_not_optimize_mut, write_result_line,
};

#[cfg(all(feature = "std", unix))]
pub use embench_core::CpuClock;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
pub use embench_core::CycleClock;
#[cfg(feature = "std")]
pub use embench_core::WallClock;

// Re-export stats
pub use embench_stats::{Accumulator, FromSample, Magnitude, Nanoseconds, OnlineStats, Summary};

/// Reporters and output formats
#[cfg(feature = "std")]
pub mod report {
    pub use embench_report::*;
}

/// Prelude for convenient imports
pub mod prelude {
    #[cfg(all(feature = "std", unix))]
    pub use crate::CpuClock;
    #[cfg(feature = "std")]
    pub use crate::WallClock;
    pub use crate::{
        Benchmarker, Clock, Nanoseconds, Reporter, State, benchmark, clobber_memory,
        do_not_optimize, do_not_optimize_mut,
    };
}

/// Register a function under its own name.
///
/// `benchmark!(b, func)` uses the harness default iteration count;
/// `benchmark!(b, func, n)` runs it exactly `n` times.
#[macro_export]
macro_rules! benchmark {
    ($benchmarker:expr, $function:ident $(,)?) => {
        $benchmarker.register(stringify!($function), $function)
    };
    ($benchmarker:expr, $function:ident, $iterations:expr $(,)?) => {
        $benchmarker.register_with_iterations(stringify!($function), $function, $iterations)
    };
}

/// Run the EMBench CLI harness.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     embench::run(|b: &mut Benchmarker<WallClock, Nanoseconds>| {
///         benchmark!(b, my_benchmark);
///     })
/// }
/// ```
#[cfg(feature = "std")]
pub use embench_cli::{
    Cli, Settings, run, run_with_cli, run_with_cli_and_defaults, run_with_defaults,
};

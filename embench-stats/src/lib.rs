#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
//! EMBench Statistical Engine
//!
//! Heap-free statistics for benchmark results:
//! - Welford's online mean/variance (numerically stable, single pass)
//! - Numeric domains: plain scalars and duration-like wrappers
//! - Explicit degenerate results for runs with fewer than two samples

mod accumulator;
mod online;
mod summary;

pub use accumulator::{Accumulator, FromSample, Magnitude, Nanoseconds};
pub use online::OnlineStats;
pub use summary::Summary;

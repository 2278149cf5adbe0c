//! EMBench Demos
//!
//! Runnable demonstrations of the EMBench harness. This crate is not
//! published; it exists solely to host examples that depend on `embench`.
//!
//! Run any example with:
//! ```sh
//! cargo run --example <name> -p embench-demos --release
//! ```
//!
//! | Example | Clock | Shows |
//! |---------|-------|-------|
//! | `wall_clock` | `WallClock` + `Nanoseconds` | CLI harness, `benchmark!`, 100000 default iterations |
//! | `cpu_time` | `CpuClock` (µs as `f64`) | `run_with_defaults`: binary-level unit and iteration defaults |
//! | `cycle_counter` | `CycleClock` (cycles as `f64`) | No CLI: `FmtReporter` and a closure reporter |

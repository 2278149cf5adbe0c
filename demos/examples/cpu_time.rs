//! CPU Time: a clock returning plain `f64`
//!
//! `CpuClock` reads the process CPU time in microseconds, so the accumulator
//! defaults to `f64` and every value is in µs. Less variance than the wall
//! clock, usually less resolution too.
//!
//! Run with: cargo run --example cpu_time -p embench-demos --release

#[cfg(unix)]
mod cpu {
    use embench::prelude::*;

    pub type Bench = Benchmarker<CpuClock>;

    pub fn benchmark_empty(state: &mut State<CpuClock, f64>) {
        while let Some(_t) = state.next_iteration() {}
    }

    pub fn benchmark_loop(state: &mut State<CpuClock, f64>) {
        while let Some(_t) = state.next_iteration() {
            for i in 0..10_000_000i32 {
                do_not_optimize(&i);
            }
        }
    }

    pub fn benchmark_loop_double(state: &mut State<CpuClock, f64>) {
        while let Some(_t) = state.next_iteration() {
            let mut i = 0.0f64;
            while i < 10_000_000.0 {
                do_not_optimize(&i);
                i += 1.0;
            }
        }
    }
}

#[cfg(unix)]
fn main() -> anyhow::Result<()> {
    use cpu::*;
    use embench::{Settings, benchmark};

    // CpuClock counts microseconds, and each loop iteration takes tens of
    // milliseconds; embench.toml and CLI flags still take precedence
    let defaults = Settings::default()
        .with_unit("us")
        .with_default_iterations(100);

    embench::run_with_defaults(defaults, |b: &mut Bench| {
        benchmark!(b, benchmark_empty, 100_000);
        benchmark!(b, benchmark_loop);
        benchmark!(b, benchmark_loop_double, 12);
    })
}

#[cfg(not(unix))]
fn main() {
    eprintln!("CpuClock needs a Unix target");
}

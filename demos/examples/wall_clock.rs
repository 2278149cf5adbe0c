//! Wall Clock: the default setup for hosted targets
//!
//! Times an empty body (the cost of reading the clock twice) and two counting
//! loops on the monotonic wall clock, keeping statistics as fractional
//! nanoseconds.
//!
//! Run with: cargo run --example wall_clock -p embench-demos --release
//! Filter:   cargo run --example wall_clock -p embench-demos --release -- loop --format csv

use embench::prelude::*;

type Bench = Benchmarker<WallClock, Nanoseconds>;

/// Measures only the timer overhead of this clock on this machine.
fn benchmark_empty(state: &mut State<WallClock, Nanoseconds>) {
    while let Some(_t) = state.next_iteration() {}
}

fn benchmark_loop(state: &mut State<WallClock, Nanoseconds>) {
    while let Some(_t) = state.next_iteration() {
        for i in 0..10_000i32 {
            // Without this the loop folds away
            do_not_optimize(&i);
        }
    }
}

/// Same loop with a floating-point counter.
fn benchmark_loop_double(state: &mut State<WallClock, Nanoseconds>) {
    while let Some(_t) = state.next_iteration() {
        let mut i = 0.0f64;
        while i < 10_000.0 {
            do_not_optimize(&i);
            i += 1.0;
        }
    }
}

/// Setup is excluded; only the sort is timed.
fn benchmark_sort_fresh(state: &mut State<WallClock, Nanoseconds>) {
    state.iter_with_setup(
        || (0..1_000u32).rev().collect::<Vec<_>>(),
        |mut data| {
            data.sort_unstable();
            data
        },
    );
}

fn main() -> anyhow::Result<()> {
    // embench.toml and `-n` still override this
    let defaults = embench::Settings::default().with_default_iterations(100_000);

    embench::run_with_defaults(defaults, |b: &mut Bench| {
        // Names can be given explicitly...
        b.register("benchmark_empty", benchmark_empty);
        // ...or taken from the function
        benchmark!(b, benchmark_loop);
        benchmark!(b, benchmark_loop_double, 12_000);
        benchmark!(b, benchmark_sort_fresh, 2_000);
    })
}

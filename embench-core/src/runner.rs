//! Benchmark Registry and Runner
//!
//! [`Benchmarker`] owns an append-only, insertion-ordered list of benchmarks
//! and runs them one after another, each in a fresh [`State`].
//!
//! Execution is strictly sequential. A panic inside a benchmark propagates to
//! the caller of [`Benchmarker::run_benchmarks`] and the remaining benchmarks
//! do not run.

use alloc::vec::Vec;
use core::fmt;

use embench_stats::{Accumulator, FromSample};

use crate::measure::Clock;
use crate::reporter::Reporter;
use crate::state::State;

/// Iteration count used when neither the benchmark nor the harness sets one
pub const DEFAULT_ITERATIONS: u64 = 1000;

/// Signature of a benchmark function
pub type BenchmarkFn<C, A> = fn(&mut State<C, A>);

/// A registered benchmark
pub struct BenchmarkEntry<C, A> {
    /// Display name (duplicates are allowed)
    pub name: &'static str,
    /// Function driving the iteration protocol
    pub function: BenchmarkFn<C, A>,
    /// Number of timed iterations
    pub iterations: u64,
}

impl<C, A> Clone for BenchmarkEntry<C, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, A> Copy for BenchmarkEntry<C, A> {}

impl<C, A> fmt::Debug for BenchmarkEntry<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkEntry")
            .field("name", &self.name)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

/// Registry and sequential runner.
///
/// `C` is the clock, `A` the accumulator statistics are kept in. `A` defaults
/// to the clock's own duration type, which works for clocks that already
/// produce a plain scalar (such as [`CpuClock`](crate::CpuClock)).
pub struct Benchmarker<C: Clock, A = <C as Clock>::Duration> {
    default_iterations: u64,
    entries: Vec<BenchmarkEntry<C, A>>,
}

impl<C, A> Benchmarker<C, A>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
{
    /// Empty registry with [`DEFAULT_ITERATIONS`]
    pub fn new() -> Self {
        Self::with_default_iterations(DEFAULT_ITERATIONS)
    }

    /// Empty registry using `iterations` for benchmarks registered without a count
    pub fn with_default_iterations(iterations: u64) -> Self {
        Self {
            default_iterations: iterations,
            entries: Vec::new(),
        }
    }

    /// Iteration count applied by [`Benchmarker::register`]
    pub fn default_iterations(&self) -> u64 {
        self.default_iterations
    }

    /// Register a benchmark with the harness default iteration count
    pub fn register(&mut self, name: &'static str, function: BenchmarkFn<C, A>) -> &mut Self {
        let iterations = self.default_iterations;
        self.register_with_iterations(name, function, iterations)
    }

    /// Register a benchmark with an explicit iteration count
    pub fn register_with_iterations(
        &mut self,
        name: &'static str,
        function: BenchmarkFn<C, A>,
        iterations: u64,
    ) -> &mut Self {
        self.entries.push(BenchmarkEntry {
            name,
            function,
            iterations,
        });
        self
    }

    /// Registered benchmarks, in registration order
    pub fn entries(&self) -> &[BenchmarkEntry<C, A>] {
        &self.entries
    }

    /// Number of registered benchmarks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every benchmark in registration order, reporting each one as soon
    /// as it finishes.
    pub fn run_benchmarks<R: Reporter<A>>(&self, reporter: &mut R) {
        for entry in &self.entries {
            run_entry(entry, reporter);
        }
    }

    /// Run the benchmarks whose name satisfies `predicate`, in registration
    /// order. Returns how many ran.
    pub fn run_matching<P, R>(&self, mut predicate: P, reporter: &mut R) -> usize
    where
        P: FnMut(&str) -> bool,
        R: Reporter<A>,
    {
        let mut ran = 0;
        for entry in self.entries.iter().filter(|e| predicate(e.name)) {
            run_entry(entry, reporter);
            ran += 1;
        }
        ran
    }
}

/// Execute one benchmark in a fresh state and report it
fn run_entry<C, A, R>(entry: &BenchmarkEntry<C, A>, reporter: &mut R)
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
    R: Reporter<A>,
{
    tracing::debug!(
        benchmark = entry.name,
        iterations = entry.iterations,
        "running benchmark"
    );

    let mut state = State::new(entry.iterations);
    (entry.function)(&mut state);

    if state.iteration() != entry.iterations {
        tracing::warn!(
            benchmark = entry.name,
            completed = state.iteration(),
            expected = entry.iterations,
            "benchmark did not drive all iterations"
        );
    }

    let summary = state.summary();
    reporter.report(entry.name, entry.iterations, summary.mean, summary.std_dev);
}

impl<C, A> Default for Benchmarker<C, A>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, A> fmt::Debug for Benchmarker<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Benchmarker")
            .field("default_iterations", &self.default_iterations)
            .field("entries", &self.entries)
            .finish()
    }
}

//! State - The Benchmark Iteration API
//!
//! A [`State`] is created by the runner for exactly one execution of one
//! benchmark function, and handed to it as `&mut State`. The function drives
//! the iteration protocol:
//!
//! ```ignore
//! fn bench_sum(s: &mut State<WallClock, Nanoseconds>) {
//!     while let Some(_timer) = s.next_iteration() {
//!         do_not_optimize(&(0..1000u64).sum::<u64>());
//!     }
//! }
//! ```
//!
//! Each `Some` is an [`IterationTimer`] guard: the clock is read when it is
//! created and again when it is dropped, and the elapsed time is folded into
//! Welford's running mean/variance. The guard borrows the state mutably, so at
//! most one iteration is in flight. The protocol is single pass: once
//! `next_iteration` has returned `None` it keeps returning `None`.

use core::fmt;
use core::marker::PhantomData;

use embench_stats::{Accumulator, FromSample, OnlineStats, Summary};

use crate::hint::black_box;
use crate::measure::Clock;

/// Per-run measurement state: iteration counter plus running statistics
pub struct State<C, A> {
    target_iterations: u64,
    iteration: u64,
    stats: OnlineStats<A>,
    _clock: PhantomData<fn() -> C>,
}

impl<C, A> State<C, A>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
{
    /// Only the runner creates states, one per benchmark execution
    pub(crate) fn new(target_iterations: u64) -> Self {
        Self {
            target_iterations,
            iteration: 0,
            stats: OnlineStats::new(),
            _clock: PhantomData,
        }
    }

    /// Start the next timed iteration, or `None` once all iterations ran.
    ///
    /// The iteration is timed until the returned guard is dropped.
    #[inline]
    pub fn next_iteration(&mut self) -> Option<IterationTimer<'_, C, A>> {
        if self.is_done() {
            None
        } else {
            Some(IterationTimer::start(self))
        }
    }

    /// Whether every iteration has completed
    #[inline]
    pub fn is_done(&self) -> bool {
        self.iteration >= self.target_iterations
    }

    /// Number of completed iterations
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Number of iterations this run performs
    pub fn target_iterations(&self) -> u64 {
        self.target_iterations
    }

    /// Statistics over the completed iterations
    pub fn summary(&self) -> Summary<A> {
        self.stats.summary()
    }

    /// Run `f` once per remaining iteration, timing each call.
    ///
    /// The result of every call goes through [`black_box`] so it is not
    /// optimized away.
    #[inline]
    pub fn iter<T, F>(&mut self, mut f: F)
    where
        F: FnMut() -> T,
    {
        while let Some(_timer) = self.next_iteration() {
            let _ = black_box(f());
        }
    }

    /// Run `routine` once per remaining iteration with a fresh input from
    /// `setup`. Only `routine` is timed.
    #[inline]
    pub fn iter_with_setup<T, R, S, F>(&mut self, mut setup: S, mut routine: F)
    where
        S: FnMut() -> T,
        F: FnMut(T) -> R,
    {
        while !self.is_done() {
            let input = setup();
            if let Some(_timer) = self.next_iteration() {
                let _ = black_box(routine(input));
            }
        }
    }

    /// Fold one iteration's elapsed time into the statistics
    #[inline]
    fn update(&mut self, elapsed: C::Duration) {
        self.iteration += 1;
        self.stats.push(A::from_sample(elapsed));
    }
}

impl<C, A: fmt::Debug> fmt::Debug for State<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("target_iterations", &self.target_iterations)
            .field("iteration", &self.iteration)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Scoped timer for one iteration.
///
/// Dropping the guard records the iteration, on every exit path: end of the
/// loop body, `break`, `return`, `?`, or unwinding from a panic.
#[must_use = "the iteration is only timed while the guard is alive"]
pub struct IterationTimer<'s, C, A>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
{
    state: &'s mut State<C, A>,
    start: C::Instant,
}

impl<'s, C, A> IterationTimer<'s, C, A>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
{
    #[inline(always)]
    fn start(state: &'s mut State<C, A>) -> Self {
        // Read the clock last so setup of the guard is not measured
        let start = C::now();
        Self { state, start }
    }

    /// Iteration number (0-based) this guard is timing
    pub fn index(&self) -> u64 {
        self.state.iteration
    }
}

impl<C, A> Drop for IterationTimer<'_, C, A>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
{
    #[inline(always)]
    fn drop(&mut self) {
        let now = C::now();
        self.state.update(now - self.start);
    }
}

//! Optimization Barriers
//!
//! Keep benchmarked work from being constant-folded or removed as dead code.
//! Use them inside a timed iteration whenever the result would otherwise be
//! unused.

use core::sync::atomic::{Ordering, compiler_fence};

pub use core::hint::black_box;

/// Mark `value` as observed, so the computation producing it is kept.
#[inline(always)]
pub fn do_not_optimize<T>(value: &T) {
    black_box(value);
}

/// Mark `value` as observed and possibly modified.
///
/// Later reads of `value` cannot reuse what the compiler knew before the call.
#[inline(always)]
pub fn do_not_optimize_mut<T>(value: &mut T) {
    black_box(value);
}

/// Compiler-level memory barrier: prior writes are treated as visible and
/// no memory access is reordered across this point.
#[inline(always)]
pub fn clobber_memory() {
    compiler_fence(Ordering::SeqCst);
}

//! Numeric Domains
//!
//! An [`Accumulator`] is the type running means and variances are kept in.
//! Two families are supported:
//! - plain scalars (`f32`, `f64`) that multiply and take square roots natively
//! - duration-like wrappers (e.g. [`Nanoseconds`]) that expose an underlying
//!   magnitude through [`Magnitude`] and are rebuilt after each operation
//!
//! The path is picked by the type's trait impls at compile time, never per call.

use core::fmt;
use core::ops::{Add, Sub};
use core::time::Duration;

use num_traits::Float;

/// Numeric domain for running statistics.
pub trait Accumulator: Copy + Add<Output = Self> + Sub<Output = Self> {
    /// Additive identity
    fn zero() -> Self;

    /// Divide by an unsigned count
    fn div_count(self, n: u64) -> Self;

    /// Product of two values in this domain
    fn multiply(self, rhs: Self) -> Self;

    /// Square root in this domain
    fn sqrt(self) -> Self;

    /// Underlying magnitude as `f64`, for reporting
    fn to_f64(self) -> f64;
}

/// Conversion from a clock's raw elapsed value into an accumulator.
///
/// Kept separate from `From` so foreign pairs such as `u64 -> f64` (cycle
/// counts) or `Duration -> f64` can be provided here.
pub trait FromSample<D> {
    /// Convert one elapsed value
    fn from_sample(sample: D) -> Self;
}

/// Duration-like wrapper around a scalar magnitude.
///
/// Any `Copy` type with `Add`/`Sub` that implements this trait is an
/// [`Accumulator`]: multiplication, division and square root are performed on
/// the magnitude and the wrapper is reconstructed.
pub trait Magnitude: Copy {
    /// Scalar representation
    type Raw: Accumulator;

    /// Extract the magnitude
    fn magnitude(self) -> Self::Raw;

    /// Rebuild the wrapper from a magnitude
    fn from_magnitude(raw: Self::Raw) -> Self;
}

macro_rules! impl_scalar_accumulator {
    ($($t:ty),*) => {$(
        impl Accumulator for $t {
            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn div_count(self, n: u64) -> Self {
                self / n as $t
            }

            #[inline]
            fn multiply(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn sqrt(self) -> Self {
                Float::sqrt(self)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }

        impl FromSample<$t> for $t {
            #[inline]
            fn from_sample(sample: $t) -> Self {
                sample
            }
        }
    )*};
}

impl_scalar_accumulator!(f32, f64);

impl<T> Accumulator for T
where
    T: Magnitude + Add<Output = T> + Sub<Output = T>,
{
    #[inline]
    fn zero() -> Self {
        T::from_magnitude(<T::Raw as Accumulator>::zero())
    }

    #[inline]
    fn div_count(self, n: u64) -> Self {
        T::from_magnitude(self.magnitude().div_count(n))
    }

    #[inline]
    fn multiply(self, rhs: Self) -> Self {
        T::from_magnitude(self.magnitude().multiply(rhs.magnitude()))
    }

    #[inline]
    fn sqrt(self) -> Self {
        T::from_magnitude(self.magnitude().sqrt())
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.magnitude().to_f64()
    }
}

/// Raw tick counts (e.g. CPU cycles)
impl FromSample<u64> for f64 {
    #[inline]
    fn from_sample(sample: u64) -> Self {
        sample as f64
    }
}

/// `Duration` as a plain nanosecond count
impl FromSample<Duration> for f64 {
    #[inline]
    fn from_sample(sample: Duration) -> Self {
        sample.as_nanos() as f64
    }
}

// ─── Nanoseconds ─────────────────────────────────────────────────────────────

/// Nanosecond duration with a floating-point representation.
///
/// The integer nanoseconds of `core::time::Duration` lose everything below
/// one nanosecond once divided by an iteration count; this keeps the fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Nanoseconds<T = f64>(pub T);

impl<T: Copy> Nanoseconds<T> {
    /// Wrap a nanosecond magnitude
    pub const fn new(count: T) -> Self {
        Self(count)
    }

    /// Number of nanoseconds
    pub fn count(self) -> T {
        self.0
    }
}

impl<T: Add<Output = T>> Add for Nanoseconds<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<T: Sub<Output = T>> Sub for Nanoseconds<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl<T: Accumulator> Magnitude for Nanoseconds<T> {
    type Raw = T;

    #[inline]
    fn magnitude(self) -> T {
        self.0
    }

    #[inline]
    fn from_magnitude(raw: T) -> Self {
        Self(raw)
    }
}

impl<T> FromSample<Nanoseconds<T>> for Nanoseconds<T> {
    #[inline]
    fn from_sample(sample: Nanoseconds<T>) -> Self {
        sample
    }
}

impl FromSample<Duration> for Nanoseconds<f64> {
    #[inline]
    fn from_sample(sample: Duration) -> Self {
        Self(sample.as_nanos() as f64)
    }
}

impl FromSample<Duration> for Nanoseconds<f32> {
    #[inline]
    fn from_sample(sample: Duration) -> Self {
        Self(sample.as_nanos() as f32)
    }
}

impl From<Duration> for Nanoseconds<f64> {
    fn from(d: Duration) -> Self {
        Self::from_sample(d)
    }
}

impl<T: fmt::Display> fmt::Display for Nanoseconds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)?;
        f.write_str("ns")
    }
}

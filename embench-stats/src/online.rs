//! Online Statistics
//!
//! Welford's single-pass algorithm: running mean and sum of squared deviations
//! (M2) are updated per sample, so no individual sample is ever stored.

use crate::accumulator::Accumulator;
use crate::summary::Summary;

/// Running mean and variance over a stream of samples.
#[derive(Debug, Clone, Copy)]
pub struct OnlineStats<A> {
    count: u64,
    mean: A,
    m2: A,
}

impl<A: Accumulator> OnlineStats<A> {
    /// Empty statistics: no samples, mean and M2 at zero
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: A::zero(),
            m2: A::zero(),
        }
    }

    /// Fold one sample into the running statistics
    #[inline]
    pub fn push(&mut self, value: A) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean = self.mean + delta.div_count(self.count);
        let delta2 = value - self.mean;
        self.m2 = self.m2 + delta.multiply(delta2);
    }

    /// Number of samples seen
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean; `None` before the first sample
    pub fn mean(&self) -> Option<A> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sum of squared deviations from the mean (M2)
    pub fn sum_squared_deviations(&self) -> A {
        self.m2
    }

    /// Bessel-corrected sample variance `M2 / (n - 1)`; `None` for fewer than two samples
    pub fn variance(&self) -> Option<A> {
        (self.count > 1).then(|| self.m2.div_count(self.count - 1))
    }

    /// Sample standard deviation; `None` for fewer than two samples
    pub fn std_dev(&self) -> Option<A> {
        self.variance().map(A::sqrt)
    }

    /// Snapshot of the reportable statistics
    pub fn summary(&self) -> Summary<A> {
        Summary {
            count: self.count,
            mean: self.mean(),
            std_dev: self.std_dev(),
        }
    }
}

impl<A: Accumulator> Default for OnlineStats<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Accumulator> Extend<A> for OnlineStats<A> {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<A: Accumulator> FromIterator<A> for OnlineStats<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Nanoseconds;
    use rand::Rng;

    fn two_pass(samples: &[f64]) -> (f64, f64) {
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        (mean, variance.sqrt())
    }

    #[test]
    fn test_known_values() {
        let stats: OnlineStats<f64> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .into_iter()
            .collect();

        assert_eq!(stats.count(), 8);
        assert!((stats.mean().unwrap() - 5.0).abs() < 1e-12);
        // M2 = 32, variance = 32 / 7
        assert!((stats.sum_squared_deviations() - 32.0).abs() < 1e-12);
        assert!((stats.variance().unwrap() - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev().unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        let stats = OnlineStats::<f64>::new();

        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.variance(), None);
        assert_eq!(stats.std_dev(), None);
        assert_eq!(stats.sum_squared_deviations(), 0.0);
    }

    #[test]
    fn test_single_sample() {
        let mut stats = OnlineStats::<f64>::new();
        stats.push(42.5);

        assert_eq!(stats.mean(), Some(42.5));
        assert_eq!(stats.variance(), None);
        assert_eq!(stats.std_dev(), None);
    }

    #[test]
    fn test_matches_two_pass_reference() {
        let mut rng = rand::thread_rng();
        let samples: Vec<f64> = (0..1_000).map(|_| rng.gen_range(50.0..150.0)).collect();

        let stats: OnlineStats<f64> = samples.iter().copied().collect();
        let (mean, std_dev) = two_pass(&samples);

        assert!((stats.mean().unwrap() - mean).abs() < 1e-9);
        assert!((stats.std_dev().unwrap() - std_dev).abs() < 1e-9);
    }

    #[test]
    fn test_large_offset_is_stable() {
        // Naive sum-of-squares loses all precision here
        let samples: Vec<f64> = (0..100).map(|i| 1e9 + (i % 4) as f64).collect();
        let stats: OnlineStats<f64> = samples.iter().copied().collect();
        let (_, std_dev) = two_pass(&samples);

        assert!((stats.std_dev().unwrap() - std_dev).abs() < 1e-6);
    }

    #[test]
    fn test_wrapper_and_scalar_agree() {
        let raw = [10.0, 12.0, 9.0, 11.0, 13.0];
        let scalar: OnlineStats<f64> = raw.iter().copied().collect();
        let wrapped: OnlineStats<Nanoseconds> = raw.iter().copied().map(Nanoseconds).collect();

        assert_eq!(scalar.mean().unwrap(), wrapped.mean().unwrap().count());
        assert_eq!(scalar.std_dev().unwrap(), wrapped.std_dev().unwrap().count());
    }
}

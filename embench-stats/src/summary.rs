//! Summary Statistics
//!
//! Final per-benchmark numbers handed to reporters. Degenerate runs are
//! explicit rather than NaN:
//! - zero samples: no mean, no standard deviation
//! - one sample: mean is that sample, no standard deviation

/// Mean and standard deviation of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary<A> {
    /// Number of samples folded in
    pub count: u64,
    /// Mean; `None` when no sample was recorded
    pub mean: Option<A>,
    /// Sample standard deviation; `None` with fewer than two samples
    pub std_dev: Option<A>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Nanoseconds, OnlineStats};

    #[test]
    fn test_full_summary() {
        let stats: OnlineStats<f64> = [100.0, 100.0, 100.0, 100.0].into_iter().collect();
        let summary: Summary<f64> = stats.summary();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, Some(100.0));
        assert_eq!(summary.std_dev, Some(0.0));
    }

    #[test]
    fn test_degenerate_summaries() {
        let empty = OnlineStats::<f64>::new().summary();
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, None);
        assert_eq!(empty.std_dev, None);

        let single: OnlineStats<Nanoseconds> = [Nanoseconds(3.0)].into_iter().collect();
        let summary = single.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, Some(Nanoseconds(3.0)));
        assert_eq!(summary.std_dev, None);
    }
}

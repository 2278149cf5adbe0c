//! Report Data Structures

use chrono::{DateTime, Utc};
use embench_core::{Accumulator, Reporter};
use serde::{Deserialize, Serialize};

/// Version of the JSON report layout
pub const SCHEMA_VERSION: u32 = 1;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub results: Vec<BenchmarkRecord>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    /// Unit label of every mean/std_dev value (e.g. "ns")
    pub unit: String,
    /// Clock the values were measured with
    pub clock: String,
    pub default_iterations: u64,
}

/// Result of one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub iterations: u64,
    /// `None` when no iteration completed
    pub mean: Option<f64>,
    /// `None` with fewer than two completed iterations
    pub std_dev: Option<f64>,
}

impl ReportMeta {
    /// Metadata stamped with the current time
    pub fn new(unit: impl Into<String>, clock: impl Into<String>, default_iterations: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            unit: unit.into(),
            clock: clock.into(),
            default_iterations,
        }
    }
}

impl Report {
    /// Empty report
    pub fn new(meta: ReportMeta) -> Self {
        Self {
            meta,
            results: Vec::new(),
        }
    }

    /// Benchmarks that produced no usable standard deviation
    pub fn incomplete(&self) -> impl Iterator<Item = &BenchmarkRecord> {
        self.results.iter().filter(|r| r.std_dev.is_none())
    }
}

/// Reporter that records every result into a [`Report`]
#[derive(Debug, Clone)]
pub struct Collector {
    report: Report,
}

impl Collector {
    /// Collector starting from an empty report
    pub fn new(meta: ReportMeta) -> Self {
        Self {
            report: Report::new(meta),
        }
    }

    /// Results recorded so far
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.report.results
    }

    /// Finish collecting
    pub fn into_report(self) -> Report {
        self.report
    }
}

impl<A: Accumulator> Reporter<A> for Collector {
    fn report(&mut self, name: &str, iterations: u64, mean: Option<A>, std_dev: Option<A>) {
        let record = BenchmarkRecord {
            name: name.to_string(),
            iterations,
            mean: mean.map(A::to_f64),
            std_dev: std_dev.map(A::to_f64),
        };
        tracing::debug!(
            benchmark = name,
            iterations,
            mean = ?record.mean,
            std_dev = ?record.std_dev,
            "benchmark finished"
        );
        self.report.results.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embench_core::Nanoseconds;

    #[test]
    fn test_collector_converts_accumulators() {
        let mut collector = Collector::new(ReportMeta::new("ns", "wall", 1000));
        collector.report("wrapped", 10, Some(Nanoseconds(12.5)), Some(Nanoseconds(0.5)));
        collector.report("scalar", 1, Some(3.0f64), None);

        let report = collector.into_report();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].mean, Some(12.5));
        assert_eq!(report.results[0].std_dev, Some(0.5));
        assert_eq!(report.results[1].std_dev, None);

        let incomplete: Vec<_> = report.incomplete().map(|r| r.name.as_str()).collect();
        assert_eq!(incomplete, ["scalar"]);
    }

    #[test]
    fn test_meta() {
        let meta = ReportMeta::new("us", "cpu", 100);
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert_eq!(meta.unit, "us");
        assert_eq!(meta.default_iterations, 100);
    }
}

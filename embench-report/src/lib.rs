#![warn(missing_docs)]
//! EMBench Report - Reporters and Output Formats
//!
//! Concrete reporters for benchmark results:
//! - `TextReporter`: streamed tab-separated lines (human-readable)
//! - `Collector`: gathers a `Report` for JSON or CSV rendering

mod csv;
mod human;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use human::{TextReporter, format_human_output};
pub use json::generate_json_report;
pub use report::{BenchmarkRecord, Collector, Report, ReportMeta, SCHEMA_VERSION};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl OutputFormat {
    /// Canonical name, as accepted by `FromStr`
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Missing statistics serialize as `null`.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{BenchmarkRecord, ReportMeta};

    #[test]
    fn test_missing_values_are_null() {
        let mut report = Report::new(ReportMeta::new("ns", "wall", 1000));
        report.results.push(BenchmarkRecord {
            name: "once".to_string(),
            iterations: 1,
            mean: Some(4.0),
            std_dev: None,
        });

        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["results"][0]["name"], "once");
        assert_eq!(value["results"][0]["mean"], 4.0);
        assert!(value["results"][0]["std_dev"].is_null());
        assert_eq!(value["meta"]["unit"], "ns");

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results, report.results);
    }
}

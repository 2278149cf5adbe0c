//! CSV Output

use std::fmt::Write;

use crate::report::Report;

/// Generate a CSV report: `name,iterations,mean,std_dev`.
///
/// Missing statistics are empty cells.
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::from("name,iterations,mean,std_dev\n");
    for r in &report.results {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            escape(&r.name),
            r.iterations,
            cell(r.mean),
            cell(r.std_dev)
        );
    }
    out
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{BenchmarkRecord, ReportMeta};

    fn record(name: &str, mean: Option<f64>, std_dev: Option<f64>) -> BenchmarkRecord {
        BenchmarkRecord {
            name: name.to_string(),
            iterations: 3,
            mean,
            std_dev,
        }
    }

    #[test]
    fn test_csv_rows() {
        let mut report = Report::new(ReportMeta::new("ns", "wall", 3));
        report.results.push(record("plain", Some(1.5), Some(0.25)));
        report.results.push(record("never", None, None));
        report.results.push(record("a,\"b\"", Some(2.0), None));

        let csv = generate_csv_report(&report);
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "name,iterations,mean,std_dev");
        assert_eq!(lines[1], "plain,3,1.5,0.25");
        assert_eq!(lines[2], "never,3,,");
        assert_eq!(lines[3], "\"a,\"\"b\"\"\",3,2,");
    }
}

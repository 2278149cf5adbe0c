//! Human-readable Output
//!
//! Tab-separated lines, one per benchmark:
//! `name  iterations  mean<unit>  stddev<unit>`, with `-` for missing values.
//! [`TextReporter`] streams them as each benchmark finishes;
//! [`format_human_output`] renders a finished [`Report`].

use std::io;

use embench_core::{Accumulator, Reporter, write_result_line};

use crate::report::Report;

/// Format a report for terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("EMBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "clock: {}  unit: {}  default iterations: {}\n",
        report.meta.clock, report.meta.unit, report.meta.default_iterations
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for r in &report.results {
        let _ = write_result_line(
            &mut output,
            &report.meta.unit,
            &r.name,
            r.iterations,
            r.mean,
            r.std_dev,
        );
    }

    let incomplete = report.incomplete().count();
    if incomplete > 0 {
        output.push_str(&format!(
            "\n{} benchmark(s) ran fewer than two iterations; '-' marks insufficient data\n",
            incomplete
        ));
    }

    output
}

/// Streaming reporter over any [`std::io::Write`].
///
/// Every line is flushed as soon as its benchmark finishes. The first I/O
/// error stops further output and is returned by [`TextReporter::finish`].
#[derive(Debug)]
pub struct TextReporter<W> {
    out: W,
    unit: String,
    line: String,
    error: Option<io::Error>,
}

impl<W: io::Write> TextReporter<W> {
    /// Reporter appending `unit` to every value
    pub fn new(out: W, unit: impl Into<String>) -> Self {
        Self {
            out,
            unit: unit.into(),
            line: String::new(),
            error: None,
        }
    }

    /// Flush and return the writer, or the first I/O error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<A: Accumulator, W: io::Write> Reporter<A> for TextReporter<W> {
    fn report(&mut self, name: &str, iterations: u64, mean: Option<A>, std_dev: Option<A>) {
        if self.error.is_some() {
            return;
        }

        self.line.clear();
        // Formatting into a String cannot fail
        let _ = write_result_line(
            &mut self.line,
            &self.unit,
            name,
            iterations,
            mean.map(A::to_f64),
            std_dev.map(A::to_f64),
        );

        let written = self
            .out
            .write_all(self.line.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write benchmark result");
            self.error = Some(e);
        }
    }
}

//! Reporters
//!
//! A [`Reporter`] receives the final statistics of each benchmark, once,
//! right after that benchmark's function returned. Formatting and destination
//! are entirely up to the implementation.

use core::fmt;

use embench_stats::Accumulator;

/// Consumer of per-benchmark results.
///
/// `mean` is `None` when no iteration completed; `std_dev` is `None` with
/// fewer than two completed iterations.
pub trait Reporter<A> {
    /// Report one finished benchmark
    fn report(&mut self, name: &str, iterations: u64, mean: Option<A>, std_dev: Option<A>);
}

impl<A, F> Reporter<A> for F
where
    F: FnMut(&str, u64, Option<A>, Option<A>),
{
    fn report(&mut self, name: &str, iterations: u64, mean: Option<A>, std_dev: Option<A>) {
        self(name, iterations, mean, std_dev)
    }
}

/// Write one tab-separated result line:
/// `name<TAB>iterations<TAB>mean<unit><TAB>stddev<unit>`.
///
/// Missing statistics are written as `-`.
pub fn write_result_line<W: fmt::Write + ?Sized>(
    out: &mut W,
    unit: &str,
    name: &str,
    iterations: u64,
    mean: Option<f64>,
    std_dev: Option<f64>,
) -> fmt::Result {
    write!(out, "{}\t{}\t", name, iterations)?;
    write_value(out, mean, unit)?;
    out.write_char('\t')?;
    write_value(out, std_dev, unit)?;
    out.write_char('\n')
}

fn write_value<W: fmt::Write + ?Sized>(out: &mut W, value: Option<f64>, unit: &str) -> fmt::Result {
    match value {
        Some(v) => write!(out, "{:.3}{}", v, unit),
        None => out.write_char('-'),
    }
}

/// Line-per-benchmark reporter over any [`core::fmt::Write`] sink.
///
/// Works without `std`, e.g. over a UART writer. The first write error stops
/// further output and is returned by [`FmtReporter::finish`].
#[derive(Debug)]
pub struct FmtReporter<W> {
    out: W,
    unit: &'static str,
    error: Option<fmt::Error>,
}

impl<W: fmt::Write> FmtReporter<W> {
    /// Reporter with no unit suffix
    pub fn new(out: W) -> Self {
        Self::with_unit(out, "")
    }

    /// Reporter appending `unit` (e.g. `"ns"`) to every value
    pub fn with_unit(out: W, unit: &'static str) -> Self {
        Self {
            out,
            unit,
            error: None,
        }
    }

    /// Return the sink, or the first write error
    pub fn finish(self) -> Result<W, fmt::Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<A: Accumulator, W: fmt::Write> Reporter<A> for FmtReporter<W> {
    fn report(&mut self, name: &str, iterations: u64, mean: Option<A>, std_dev: Option<A>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = write_result_line(
            &mut self.out,
            self.unit,
            name,
            iterations,
            mean.map(A::to_f64),
            std_dev.map(A::to_f64),
        ) {
            self.error = Some(e);
        }
    }
}

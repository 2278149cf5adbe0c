#![warn(missing_docs)]
//! EMBench CLI Library
//!
//! This module provides the CLI infrastructure for benchmark binaries.
//! Call [`run`] from `main` with a closure that registers your benchmarks to
//! get filtering, listing, output formats and `embench.toml` support.
//!
//! # Example
//!
//! ```ignore
//! use embench::prelude::*;
//!
//! fn sum(state: &mut State<WallClock, Nanoseconds>) {
//!     while let Some(_t) = state.next_iteration() {
//!         do_not_optimize(&(0..64u64).sum::<u64>());
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     embench_cli::run(|b: &mut Benchmarker<WallClock, Nanoseconds>| {
//!         b.register("sum", sum);
//!     })
//! }
//! ```

mod config;
mod error;

pub use config::*;
pub use error::CliError;

use anyhow::Context;
use clap::{Parser, Subcommand};
use embench_core::{Accumulator, Benchmarker, Clock, DEFAULT_ITERATIONS, FromSample};
use embench_report::{
    Collector, OutputFormat, ReportMeta, TextReporter, format_human_output, generate_csv_report,
    generate_json_report,
};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// EMBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "embench")]
#[command(author, version, about = "EMBench - embedded micro-benchmark harness")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter benchmarks by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: human, json, csv [default: from embench.toml, else human]
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Iterations for benchmarks registered without an explicit count
    #[arg(long, short = 'n')]
    pub iterations: Option<u64>,

    /// Unit label printed after every value (e.g. ns, us, cycles)
    #[arg(long)]
    pub unit: Option<String>,

    /// Dry run - list benchmarks without executing
    #[arg(long, alias = "list")]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all registered benchmarks
    List,
    /// Run benchmarks (default)
    Run,
}

/// Settings after layering CLI flags over `embench.toml` over the binary's defaults.
///
/// `Settings::default()` holds the built-in defaults: [`DEFAULT_ITERATIONS`],
/// human output, unit `ns`. A benchmark binary can replace them with the
/// builder methods and pass the result to [`run_with_defaults`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Harness-wide default iteration count
    pub default_iterations: u64,
    /// Output format
    pub format: OutputFormat,
    /// Unit label
    pub unit: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_iterations: DEFAULT_ITERATIONS,
            format: OutputFormat::Human,
            unit: "ns".to_string(),
        }
    }
}

impl Settings {
    /// Replace the default iteration count
    pub fn with_default_iterations(mut self, iterations: u64) -> Self {
        self.default_iterations = iterations;
        self
    }

    /// Replace the default unit label (match it to the clock, e.g. `us` for `CpuClock`)
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Replace the default output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Layer the config file, then CLI flags, over `self`
    pub fn resolve(self, cli: &Cli, config: &EmbenchConfig) -> Result<Self, CliError> {
        let format = match cli.format.as_deref().or(config.output.format.as_deref()) {
            Some(name) => name.parse::<OutputFormat>().map_err(CliError::UnknownFormat)?,
            None => self.format,
        };

        Ok(Self {
            default_iterations: cli
                .iterations
                .or(config.runner.default_iterations)
                .unwrap_or(self.default_iterations),
            format,
            unit: cli
                .unit
                .clone()
                .or_else(|| config.output.unit.clone())
                .unwrap_or(self.unit),
        })
    }
}

/// Run the EMBench CLI with the process arguments.
/// This is the main entry point for benchmark binaries.
///
/// `register` receives a harness already configured with the resolved default
/// iteration count.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
/// Panics raised by benchmark bodies are not caught.
pub fn run<C, A, F>(register: F) -> anyhow::Result<()>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
    F: FnOnce(&mut Benchmarker<C, A>),
{
    run_with_defaults(Settings::default(), register)
}

/// Like [`run`], with the binary's own defaults below `embench.toml` and CLI flags.
pub fn run_with_defaults<C, A, F>(defaults: Settings, register: F) -> anyhow::Result<()>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
    F: FnOnce(&mut Benchmarker<C, A>),
{
    let cli = Cli::parse();
    run_with_cli_and_defaults(cli, defaults, register)
}

/// Run the EMBench CLI with pre-parsed arguments.
pub fn run_with_cli<C, A, F>(cli: Cli, register: F) -> anyhow::Result<()>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
    F: FnOnce(&mut Benchmarker<C, A>),
{
    run_with_cli_and_defaults(cli, Settings::default(), register)
}

/// Run the EMBench CLI with pre-parsed arguments and the binary's own defaults.
pub fn run_with_cli_and_defaults<C, A, F>(
    cli: Cli,
    defaults: Settings,
    register: F,
) -> anyhow::Result<()>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
    F: FnOnce(&mut Benchmarker<C, A>),
{
    init_logging(cli.verbose);

    // Discover embench.toml configuration (CLI flags override)
    let config = EmbenchConfig::discover().unwrap_or_default();
    let settings = defaults.resolve(&cli, &config)?;

    let filter = Regex::new(&cli.filter).map_err(|source| CliError::InvalidFilter {
        pattern: cli.filter.clone(),
        source,
    })?;

    let mut benchmarker = Benchmarker::<C, A>::with_default_iterations(settings.default_iterations);
    register(&mut benchmarker);

    match cli.command {
        Some(Commands::List) => list_benchmarks(&benchmarker, &filter),
        Some(Commands::Run) => run_benchmarks(&cli, &settings, &benchmarker, &filter),
        None => {
            // Default: run benchmarks
            if cli.dry_run {
                list_benchmarks(&benchmarker, &filter)
            } else {
                run_benchmarks(&cli, &settings, &benchmarker, &filter)
            }
        }
    }
}

/// Install the stderr fmt subscriber. `RUST_LOG` overrides the default filter.
///
/// A subscriber installed earlier (by the host binary or another test) is left in place.
fn init_logging(verbose: bool) {
    let default = if verbose { "embench=debug" } else { "embench=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Short clock name for report metadata, e.g. `WallClock`
fn clock_name<C>() -> &'static str {
    let full = std::any::type_name::<C>();
    full.rsplit("::").next().unwrap_or(full)
}

fn list_benchmarks<C, A>(benchmarker: &Benchmarker<C, A>, filter: &Regex) -> anyhow::Result<()>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "EMBench Plan:")?;
    writeln!(out, "├── clock: {}", clock_name::<C>())?;

    let mut total = 0;
    for entry in benchmarker.entries().iter().filter(|e| filter.is_match(e.name)) {
        writeln!(out, "│   ├── {} ({} iterations)", entry.name, entry.iterations)?;
        total += 1;
    }

    writeln!(out, "{} benchmarks found.", total)?;
    Ok(())
}

fn run_benchmarks<C, A>(
    cli: &Cli,
    settings: &Settings,
    benchmarker: &Benchmarker<C, A>,
    filter: &Regex,
) -> anyhow::Result<()>
where
    C: Clock,
    A: Accumulator + FromSample<C::Duration>,
{
    let selected = benchmarker
        .entries()
        .iter()
        .filter(|e| filter.is_match(e.name))
        .count();
    if selected == 0 {
        tracing::warn!(filter = %cli.filter, "no benchmarks matched");
        return Ok(());
    }

    tracing::info!(
        "Running {} of {} benchmarks with {} ({} output, unit {})",
        selected,
        benchmarker.len(),
        clock_name::<C>(),
        settings.format.as_str(),
        settings.unit
    );

    let start_time = Instant::now();
    let matches = |name: &str| filter.is_match(name);

    // Open the destination up front so a bad path fails before any benchmark runs
    let mut sink = open_output(cli.output.as_deref())?;

    let ran = if settings.format == OutputFormat::Human && cli.output.is_none() {
        // Terminal output streams each line as soon as its benchmark finishes
        let mut reporter = TextReporter::new(sink, settings.unit.as_str());
        let ran = benchmarker.run_matching(matches, &mut reporter);
        reporter.finish()?;
        ran
    } else {
        let meta = ReportMeta::new(
            settings.unit.as_str(),
            clock_name::<C>(),
            settings.default_iterations,
        );
        let mut collector = Collector::new(meta);
        let ran = benchmarker.run_matching(matches, &mut collector);
        let report = collector.into_report();

        let output = match settings.format {
            OutputFormat::Json => generate_json_report(&report)?,
            OutputFormat::Csv => generate_csv_report(&report),
            OutputFormat::Human => format_human_output(&report),
        };

        sink.write_all(output.as_bytes())?;
        sink.flush()?;
        ran
    };

    if let Some(path) = &cli.output {
        tracing::info!("Report written to: {}", path.display());
    }
    tracing::info!(
        "Finished {} benchmarks in {:.2?}",
        ran,
        start_time.elapsed()
    );

    Ok(())
}

/// Output file (parent directories created) or stdout
fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(std::io::stdout().lock()));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create output directory {}", parent.display())
        })?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embench_core::State;
    use std::cell::Cell;

    thread_local! {
        static TICKS: Cell<f64> = const { Cell::new(0.0) };
        static BODY_RUNS: Cell<u64> = const { Cell::new(0) };
    }

    /// Advances by one unit per reading, so every iteration measures 1.0
    struct TickClock;

    impl Clock for TickClock {
        type Instant = f64;
        type Duration = f64;

        fn now() -> f64 {
            TICKS.with(|t| {
                let now = t.get() + 1.0;
                t.set(now);
                now
            })
        }
    }

    fn noop(state: &mut State<TickClock, f64>) {
        while let Some(_t) = state.next_iteration() {}
        BODY_RUNS.with(|r| r.set(r.get() + 1));
    }

    fn register(b: &mut Benchmarker<TickClock, f64>) {
        b.register("alpha", noop);
        b.register_with_iterations("beta", noop, 1);
        b.register("gamma", noop);
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("embench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.filter, ".*");
        assert!(cli.format.is_none());
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);

        let cli = parse(&["--bench", "--list", "loop"]);
        assert!(cli.bench);
        assert!(cli.dry_run);
        assert_eq!(cli.filter, "loop");
    }

    #[test]
    fn test_settings_precedence() {
        let mut config = EmbenchConfig::default();
        config.runner.default_iterations = Some(500);
        config.output.unit = Some("us".to_string());
        config.output.format = Some("csv".to_string());

        let settings = Settings::default().resolve(&parse(&[]), &config).unwrap();
        assert_eq!(settings.default_iterations, 500);
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.unit, "us");

        let cli = parse(&["-n", "7", "--format", "json", "--unit", "cycles"]);
        let settings = Settings::default().resolve(&cli, &config).unwrap();
        assert_eq!(settings.default_iterations, 7);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.unit, "cycles");
    }

    #[test]
    fn test_binary_defaults_sit_below_config() {
        let defaults = Settings::default()
            .with_default_iterations(100)
            .with_unit("us")
            .with_format(OutputFormat::Csv);

        // Nothing configured: the binary's defaults apply
        let settings = defaults
            .clone()
            .resolve(&parse(&[]), &EmbenchConfig::default())
            .unwrap();
        assert_eq!(settings, defaults);

        // A config file value beats them, untouched keys keep them
        let mut config = EmbenchConfig::default();
        config.runner.default_iterations = Some(20);
        let settings = defaults.clone().resolve(&parse(&[]), &config).unwrap();
        assert_eq!(settings.default_iterations, 20);
        assert_eq!(settings.unit, "us");
        assert_eq!(settings.format, OutputFormat::Csv);

        // And a flag beats the config file
        let settings = defaults.resolve(&parse(&["-n", "3"]), &config).unwrap();
        assert_eq!(settings.default_iterations, 3);
    }

    #[test]
    fn test_builtin_defaults() {
        let settings = Settings::default()
            .resolve(&parse(&[]), &EmbenchConfig::default())
            .unwrap();
        assert_eq!(settings.default_iterations, 1000);
        assert_eq!(settings.format, OutputFormat::Human);
        assert_eq!(settings.unit, "ns");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let cli = parse(&["--format", "html"]);
        let err = Settings::default()
            .resolve(&cli, &EmbenchConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::UnknownFormat(_)));
    }

    #[test]
    fn test_invalid_filter_is_error() {
        let cli = parse(&["(unclosed"]);
        let err = run_with_cli(cli, register).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_csv_output_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.csv");
        let path_str = path.to_str().unwrap();

        let cli = parse(&["^(alpha|beta)$", "--format", "csv", "-n", "4", "-o", path_str]);
        run_with_cli(cli, register).unwrap();

        let csv = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec!["name,iterations,mean,std_dev", "alpha,4,1,0", "beta,1,1,"]
        );
    }

    #[test]
    fn test_human_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let path_str = path.to_str().unwrap();

        let cli = parse(&["--format", "human", "-n", "3", "--unit", "ticks", "-o", path_str]);
        run_with_cli(cli, register).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("EMBench Results"));
        assert!(text.contains("clock: TickClock  unit: ticks  default iterations: 3"));
        assert!(text.contains(
            "alpha\t3\t1.000ticks\t0.000ticks\n\
             beta\t1\t1.000ticks\t-\n\
             gamma\t3\t1.000ticks\t0.000ticks\n"
        ));
        assert!(text.contains("1 benchmark(s) ran fewer than two iterations"));
    }

    #[test]
    fn test_bad_output_path_fails_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("results.json");
        let path_str = path.to_str().unwrap();

        BODY_RUNS.with(|r| r.set(0));
        for format in ["json", "csv", "human"] {
            let cli = parse(&["--format", format, "-o", path_str]);
            let err = run_with_cli(cli, register).unwrap_err();
            assert!(
                format!("{:#}", err).contains(blocker.to_str().unwrap()),
                "error should name the path: {:#}",
                err
            );
        }
        assert_eq!(BODY_RUNS.with(Cell::get), 0);
    }

    #[test]
    fn test_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let path_str = path.to_str().unwrap();

        let cli = parse(&["gamma", "--format", "json", "-o", path_str]);
        run_with_cli(cli, register).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["meta"]["clock"], "TickClock");
        assert_eq!(json["meta"]["default_iterations"], 1000);
        assert_eq!(json["results"][0]["name"], "gamma");
        assert_eq!(json["results"][0]["iterations"], 1000);
    }

    #[test]
    fn test_clock_name() {
        assert_eq!(clock_name::<TickClock>(), "TickClock");
        assert_eq!(clock_name::<embench_core::WallClock>(), "WallClock");
    }
}

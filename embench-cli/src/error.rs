//! CLI Errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures the CLI reports before or after running benchmarks.
///
/// Panics inside benchmark bodies are not caught and never become a `CliError`.
#[derive(Debug, Error)]
pub enum CliError {
    /// The positional filter is not a valid regex
    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidFilter {
        /// Pattern as given on the command line
        pattern: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// `--format` or `output.format` names an unknown format
    #[error("{0}")]
    UnknownFormat(String),

    /// Config file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    ConfigRead {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`EmbenchConfig`](crate::EmbenchConfig)
    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        /// Config file path
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },
}

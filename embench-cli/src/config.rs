//! Configuration loading from embench.toml
//!
//! EMBench configuration can be specified in an `embench.toml` file in the
//! project root. The file is discovered by walking up from the current
//! directory; CLI flags override anything it sets. Keys left out fall back to
//! the defaults of the benchmark binary, then to the built-in ones.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// File name searched for by [`EmbenchConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "embench.toml";

/// EMBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmbenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Iterations for benchmarks registered without an explicit count
    #[serde(default)]
    pub default_iterations: Option<u64>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default)]
    pub format: Option<String>,
    /// Unit label printed after every value
    #[serde(default)]
    pub unit: Option<String>,
}

impl EmbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Try to discover and load configuration by walking up from the current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(dir)
    }

    /// Walk up from `dir` and load the first `embench.toml` found.
    ///
    /// A file that fails to load is logged and treated as absent.
    pub fn discover_from(dir: impl Into<PathBuf>) -> Option<Self> {
        let mut dir = dir.into();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!("{}; using defaults", e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string.
    ///
    /// Every key is commented out so the benchmark binary's own defaults
    /// stay in effect until a value is uncommented.
    pub fn default_toml() -> String {
        r#"# EMBench Configuration

[runner]
# Iterations for benchmarks registered without an explicit count
# default_iterations = 1000

[output]
# Output format: human, json, csv
# format = "human"
# Unit label printed after every value (match your clock/accumulator)
# unit = "ns"
"#
        .to_string()
    }
}

//! Configuration loading from snipbench.toml
//!
//! Configuration can be specified in a `snipbench.toml` file in the project root.
//! The file is discovered by walking up from the current directory.

use crate::engine::{DEFAULT_AMOUNT, RunOptions};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// File name searched for by [`SnipConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "snipbench.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// amount is zero
    #[error("amount must be at least 1, got {0}")]
    InvalidAmount(u32),

    /// A duration string could not be parsed
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration {
        /// Offending input
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// Failed to read the configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    fn duration(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// snipbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnipConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Samples per test
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Pause after each sample (e.g., "1ms"); omitted = no pause
    #[serde(default)]
    pub delay_between: Option<String>,
    /// Pause after each test (e.g., "50ms"); "0ms" disables it
    #[serde(default = "default_delay_after")]
    pub delay_after: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            delay_between: None,
            delay_after: default_delay_after(),
        }
    }
}

fn default_amount() -> u32 {
    DEFAULT_AMOUNT.get()
}
fn default_delay_after() -> Option<String> {
    Some("50ms".to_string())
}

impl RunnerConfig {
    /// Validate and convert into engine options
    pub fn to_run_options(&self) -> Result<RunOptions, ConfigError> {
        let amount =
            NonZeroU32::new(self.amount).ok_or(ConfigError::InvalidAmount(self.amount))?;
        let inter_sample_delay = self
            .delay_between
            .as_deref()
            .map(SnipConfig::parse_duration)
            .transpose()?;
        let inter_test_delay = self
            .delay_after
            .as_deref()
            .map(SnipConfig::parse_duration)
            .transpose()?;

        Ok(RunOptions::new(amount)
            .with_inter_sample_delay(inter_sample_delay)
            .with_inter_test_delay(inter_test_delay))
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl SnipConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        warn!(path = %config_path.display(), error = %e, "ignoring invalid config");
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

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# snipbench configuration

[runner]
# Samples collected per test
amount = 100
# Pause after every sample, lets the allocator settle (uncomment to enable)
# delay_between = "1ms"
# Pause after every test ("0ms" disables it)
delay_after = "50ms"

[output]
# Output format: human or json
format = "human"
"#
        .to_string()
    }

    /// Parse a duration string (e.g., "50ms", "1.5s", "250us").
    ///
    /// A bare number is taken as milliseconds.
    pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::duration(s, "empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = trimmed
            .char_indices()
            .find(|(_, c)| c.is_alphabetic() || *c == 'µ')
            .map(|(i, _)| trimmed.split_at(i))
            .unwrap_or((trimmed, "ms"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| ConfigError::duration(s, format!("invalid number '{num_part}'")))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::duration(s, "must be a non-negative number"));
        }

        let multiplier: f64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1.0,
            "us" | "µs" => 1_000.0,
            "ms" => 1_000_000.0,
            "s" => 1_000_000_000.0,
            "m" | "min" => 60_000_000_000.0,
            other => return Err(ConfigError::duration(s, format!("unknown unit '{other}'"))),
        };

        Ok(Duration::from_nanos((value * multiplier) as u64))
    }
}

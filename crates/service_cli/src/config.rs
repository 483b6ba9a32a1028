//! Driver configuration.
//!
//! Loaded from an optional TOML file, then environment variables, then
//! command line flags.
//!
//! ```toml
//! log_level = "info"
//!
//! [option]
//! strike = 50.0
//! volatility = 0.2
//! rate = 0.01
//! maturity = 1.0
//!
//! [monte_carlo]
//! iterations = 200000
//! seed = 42
//! ```

use std::path::Path;
use std::str::FromStr;

use pricer_models::instruments::{InstrumentError, OptionKind, OptionSpec};
use pricer_pricing::mc::MonteCarloConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file, read only if present.
pub const DEFAULT_CONFIG_FILE: &str = "vanilla-greeks.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {name}: cannot parse '{value}'")]
    EnvError { name: &'static str, value: String },
}

/// Log levels accepted in the file, environment and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Economic parameters shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionSection {
    pub strike: f64,
    pub volatility: f64,
    pub rate: f64,
    pub maturity: f64,
}

impl Default for OptionSection {
    fn default() -> Self {
        Self {
            strike: 50.0,
            volatility: 0.2,
            rate: 0.01,
            maturity: 1.0,
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MonteCarloSection {
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            iterations: 200_000,
            seed: None,
        }
    }
}

/// Fully resolved driver configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub option: OptionSection,
    pub monte_carlo: MonteCarloSection,
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl CliConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Loads a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Applies `GREEKS_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Applies `GREEKS_*` overrides using `lookup` as the environment.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_env(&lookup, "GREEKS_STRIKE")? {
            self.option.strike = v;
        }
        if let Some(v) = parse_env(&lookup, "GREEKS_VOLATILITY")? {
            self.option.volatility = v;
        }
        if let Some(v) = parse_env(&lookup, "GREEKS_RATE")? {
            self.option.rate = v;
        }
        if let Some(v) = parse_env(&lookup, "GREEKS_MATURITY")? {
            self.option.maturity = v;
        }
        if let Some(v) = parse_env(&lookup, "GREEKS_ITERATIONS")? {
            self.monte_carlo.iterations = v;
        }
        if let Some(v) = parse_env(&lookup, "GREEKS_SEED")? {
            self.monte_carlo.seed = Some(v);
        }
        if let Some(level) = lookup("GREEKS_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(strike) = cli.strike {
            self.option.strike = strike;
        }
        if let Some(volatility) = cli.volatility {
            self.option.volatility = volatility;
        }
        if let Some(rate) = cli.rate {
            self.option.rate = rate;
        }
        if let Some(maturity) = cli.maturity {
            self.option.maturity = maturity;
        }
        if let Some(iterations) = cli.iterations {
            self.monte_carlo.iterations = iterations;
        }
        if cli.seed.is_some() {
            self.monte_carlo.seed = cli.seed;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
    }

    /// Validated option description of the given kind.
    pub fn option_spec(&self, kind: OptionKind) -> Result<OptionSpec, InstrumentError> {
        let o = &self.option;
        OptionSpec::new(o.strike, o.volatility, o.rate, o.maturity, kind)
    }

    /// Validated Monte Carlo configuration.
    pub fn monte_carlo_config(
        &self,
    ) -> Result<MonteCarloConfig, pricer_pricing::mc::ConfigError> {
        MonteCarloConfig::builder()
            .n_iterations(self.monte_carlo.iterations)
            .maybe_seed(self.monte_carlo.seed)
            .build()
    }
}

fn parse_env<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvError { name, value }),
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub strike: Option<f64>,
    pub volatility: Option<f64>,
    pub rate: Option<f64>,
    pub maturity: Option<f64>,
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub log_level: Option<LogLevel>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
///
/// A missing file is an error only when it was named explicitly.
pub fn build_config(
    path: &Path,
    explicit: bool,
    cli: &CliOverrides,
) -> Result<CliConfig, ConfigError> {
    let mut config = if path.exists() || explicit {
        CliConfig::from_file(path)?
    } else {
        CliConfig::default()
    };
    config.apply_env()?;
    config.merge_with_cli(cli);
    Ok(config)
}

//! Error types for the Monte Carlo engine.
//!
//! Configuration is the only failure mode: once a pricer is built, every
//! call returns numbers (possibly non-finite) rather than errors.

use thiserror::Error;

/// Configuration error for Monte Carlo pricer.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Iteration count outside valid range [1, 50_000_000].
    #[error("Invalid iteration count {0}: must be in range [1, 50_000_000]")]
    InvalidIterationCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

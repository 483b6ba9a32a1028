//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for Monte Carlo
//! pricing simulations.

use super::error::ConfigError;

/// Maximum number of draws per pricing call.
pub const MAX_ITERATIONS: usize = 50_000_000;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_iterations(200_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_iterations(), 200_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Number of draws per pricing call.
    n_iterations: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of draws per pricing call.
    #[inline]
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIterationCount`] if `n_iterations` is 0
    /// or greater than [`MAX_ITERATIONS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_iterations == 0 || self.n_iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidIterationCount(self.n_iterations));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Provides a fluent API with validation at build time.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_iterations: Option<usize>,
    seed: Option<u64>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of draws per pricing call.
    ///
    /// # Arguments
    ///
    /// * `n_iterations` - Number of draws in [1, 50_000_000]
    #[inline]
    pub fn n_iterations(mut self, n_iterations: usize) -> Self {
        self.n_iterations = Some(n_iterations);
        self
    }

    /// Sets the seed for reproducibility.
    ///
    /// Without a seed every call draws from fresh entropy.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_iterations` is not set or invalid.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_iterations = self.n_iterations.ok_or(ConfigError::InvalidParameter {
            name: "n_iterations",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_iterations,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}

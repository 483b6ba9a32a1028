//! Instrument error types.
//!
//! This module provides structured error handling for option
//! construction.

use thiserror::Error;

/// Option construction errors.
///
/// Every economic parameter is checked once, when the [`OptionSpec`](super::OptionSpec)
/// is built. Values are reported as given, never clamped.
///
/// # Variants
/// - `InvalidStrike`: Strike is non-positive or non-finite
/// - `InvalidVolatility`: Volatility is non-positive or non-finite
/// - `InvalidRate`: Risk-free rate is non-finite
/// - `InvalidMaturity`: Time to maturity is non-positive or non-finite
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid risk-free rate.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Invalid time to maturity.
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },
}

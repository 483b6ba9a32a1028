//! European option parameters.
//!
//! This module provides [`OptionSpec`], the immutable economic description
//! shared by the analytic and Monte Carlo engines.

use std::fmt;

use super::error::InstrumentError;
use super::payoff::OptionKind;

/// Flat-parameter description of a European vanilla option.
///
/// Holds strike, annualised volatility, continuously compounded risk-free
/// rate, time to maturity in years and the option kind. Validated once at
/// construction and never mutated afterwards; copy it freely between
/// pricers.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionKind, OptionSpec};
///
/// let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Call).unwrap();
/// assert_eq!(spec.strike(), 50.0);
/// assert_eq!(
///     spec.to_string(),
///     "EuropeanOption: [Strike:50; Vol:0.2; RFRate:0.01; Time:1; IsCall:true;]"
/// );
///
/// // Zero volatility is rejected
/// assert!(OptionSpec::new(50.0, 0.0, 0.01, 1.0, OptionKind::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    strike: f64,
    volatility: f64,
    rate: f64,
    maturity: f64,
    kind: OptionKind,
}

impl OptionSpec {
    /// Creates a validated option description.
    ///
    /// # Arguments
    /// * `strike` - Strike price (must be positive and finite)
    /// * `volatility` - Annualised volatility (must be positive and finite)
    /// * `rate` - Risk-free rate (must be finite, may be negative)
    /// * `maturity` - Time to maturity in years (must be positive and finite)
    /// * `kind` - Call or put
    ///
    /// # Errors
    /// The first failing parameter, in argument order, as an [`InstrumentError`].
    pub fn new(
        strike: f64,
        volatility: f64,
        rate: f64,
        maturity: f64,
        kind: OptionKind,
    ) -> Result<Self, InstrumentError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(InstrumentError::InvalidStrike { strike });
        }

        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(InstrumentError::InvalidVolatility { volatility });
        }

        if !rate.is_finite() {
            return Err(InstrumentError::InvalidRate { rate });
        }

        if !(maturity.is_finite() && maturity > 0.0) {
            return Err(InstrumentError::InvalidMaturity { maturity });
        }

        Ok(Self {
            strike,
            volatility,
            rate,
            maturity,
            kind,
        })
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the option kind.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// e^(−rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Present value of the strike, K·e^(−rT).
    #[inline]
    pub fn discounted_strike(&self) -> f64 {
        self.strike * self.discount_factor()
    }

    /// Same economics with a different kind, e.g. the other leg of a straddle.
    pub fn with_kind(&self, kind: OptionKind) -> Self {
        Self { kind, ..*self }
    }
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EuropeanOption: [Strike:{}; Vol:{}; RFRate:{}; Time:{}; IsCall:{};]",
            self.strike,
            self.volatility,
            self.rate,
            self.maturity,
            self.kind.is_call()
        )
    }
}

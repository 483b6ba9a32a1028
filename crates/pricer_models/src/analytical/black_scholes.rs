//! Black-Scholes pricing for European options.
//!
//! This module provides [`AnalyticPricer`], the closed-form engine that
//! prices a vector of spot scenarios in one call.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Reporting Units
//!
//! - Theta is per calendar day (annual theta / 365)
//! - Vega and Rho are per one percentage point (raw sensitivity × 0.01)
//!
//! ## Degenerate Inputs
//!
//! No value is clamped. Non-positive spots or a vanishing σ√T yield
//! non-finite d₁ and the Greeks follow IEEE 754 semantics from there.

use pricer_core::types::{Greek, GreekTable, TableError};

use super::distributions::{norm_cdf, norm_pdf};
use crate::instruments::{OptionKind, OptionSpec};

/// Calendar days per year used to express theta per day.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scale from a unit move to a one percentage point move.
pub const PER_POINT: f64 = 0.01;

/// Closed-form price and Greeks for a European option.
///
/// A pure function of its [`OptionSpec`] and the spot vector; calling any
/// method twice with the same spots returns identical output.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticPricer;
/// use pricer_models::instruments::{OptionKind, OptionSpec};
///
/// let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Call).unwrap();
/// let pricer = AnalyticPricer::new(spec);
/// let price = pricer.price(&[65.0]);
/// assert!((price[0] - 15.948_160_1).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticPricer {
    spec: OptionSpec,
}

impl AnalyticPricer {
    /// Creates a pricer for the given option.
    pub fn new(spec: OptionSpec) -> Self {
        Self { spec }
    }

    /// Returns the option description.
    #[inline]
    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    /// σ√T.
    #[inline]
    fn vol_sqrt_t(&self) -> f64 {
        self.spec.volatility() * self.spec.maturity().sqrt()
    }

    #[inline]
    fn d1_at(&self, spot: f64) -> f64 {
        let s = &self.spec;
        let sigma = s.volatility();
        let log_moneyness = (spot / s.strike()).ln();
        let drift = (s.rate() + 0.5 * sigma * sigma) * s.maturity();
        (log_moneyness + drift) / self.vol_sqrt_t()
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T) per spot.
    pub fn d1(&self, spots: &[f64]) -> Vec<f64> {
        spots.iter().map(|&s| self.d1_at(s)).collect()
    }

    /// d₂ = d₁ − σ√T per spot.
    pub fn d2(&self, spots: &[f64]) -> Vec<f64> {
        let vol_sqrt_t = self.vol_sqrt_t();
        spots.iter().map(|&s| self.d1_at(s) - vol_sqrt_t).collect()
    }

    /// Option value per spot.
    ///
    /// The put is evaluated directly from N(−d₂) and N(−d₁) rather than
    /// through parity, which keeps deep in-the-money puts accurate.
    pub fn price(&self, spots: &[f64]) -> Vec<f64> {
        let k_df = self.spec.discounted_strike();
        let vol_sqrt_t = self.vol_sqrt_t();
        spots
            .iter()
            .map(|&s| {
                let d1 = self.d1_at(s);
                let d2 = d1 - vol_sqrt_t;
                match self.spec.kind() {
                    OptionKind::Call => s * norm_cdf(d1) - k_df * norm_cdf(d2),
                    OptionKind::Put => k_df * norm_cdf(-d2) - s * norm_cdf(-d1),
                }
            })
            .collect()
    }

    /// ∂V/∂S: N(d₁) for a call, N(d₁) − 1 for a put.
    pub fn delta(&self, spots: &[f64]) -> Vec<f64> {
        spots
            .iter()
            .map(|&s| {
                let n_d1 = norm_cdf(self.d1_at(s));
                match self.spec.kind() {
                    OptionKind::Call => n_d1,
                    OptionKind::Put => n_d1 - 1.0,
                }
            })
            .collect()
    }

    /// ∂²V/∂S² = φ(d₁) / (Sσ√T), identical for calls and puts.
    pub fn gamma(&self, spots: &[f64]) -> Vec<f64> {
        let vol_sqrt_t = self.vol_sqrt_t();
        spots
            .iter()
            .map(|&s| norm_pdf(self.d1_at(s)) / (s * vol_sqrt_t))
            .collect()
    }

    /// S·φ(d₁)·√T per one point of volatility.
    pub fn vega(&self, spots: &[f64]) -> Vec<f64> {
        let sqrt_t = self.spec.maturity().sqrt();
        spots
            .iter()
            .map(|&s| s * norm_pdf(self.d1_at(s)) * sqrt_t * PER_POINT)
            .collect()
    }

    /// Time decay per calendar day.
    ///
    /// Call: [−Sφ(d₁)σ / (2√T) − rK·e^(−rT)·N(d₂)] / 365
    /// Put: [−Sφ(d₁)σ / (2√T) + rK·e^(−rT)·N(−d₂)] / 365
    pub fn theta(&self, spots: &[f64]) -> Vec<f64> {
        let s = &self.spec;
        let sqrt_t = s.maturity().sqrt();
        let vol_sqrt_t = self.vol_sqrt_t();
        let r_k_df = s.rate() * s.discounted_strike();
        spots
            .iter()
            .map(|&spot| {
                let d1 = self.d1_at(spot);
                let d2 = d1 - vol_sqrt_t;
                let decay = -spot * norm_pdf(d1) * s.volatility() / (2.0 * sqrt_t);
                let carry = match s.kind() {
                    OptionKind::Call => -r_k_df * norm_cdf(d2),
                    OptionKind::Put => r_k_df * norm_cdf(-d2),
                };
                (decay + carry) / DAYS_PER_YEAR
            })
            .collect()
    }

    /// ±K·T·e^(−rT)·N(±d₂) per one point of rate.
    pub fn rho(&self, spots: &[f64]) -> Vec<f64> {
        let s = &self.spec;
        let k_t_df = s.discounted_strike() * s.maturity();
        let vol_sqrt_t = self.vol_sqrt_t();
        spots
            .iter()
            .map(|&spot| {
                let d2 = self.d1_at(spot) - vol_sqrt_t;
                let raw = match s.kind() {
                    OptionKind::Call => k_t_df * norm_cdf(d2),
                    OptionKind::Put => -k_t_df * norm_cdf(-d2),
                };
                raw * PER_POINT
            })
            .collect()
    }

    /// One Greek per spot.
    pub fn value(&self, greek: Greek, spots: &[f64]) -> Vec<f64> {
        match greek {
            Greek::Price => self.price(spots),
            Greek::Delta => self.delta(spots),
            Greek::Gamma => self.gamma(spots),
            Greek::Vega => self.vega(spots),
            Greek::Theta => self.theta(spots),
            Greek::Rho => self.rho(spots),
        }
    }

    /// Price plus the requested Greeks as a table aligned with `spots`.
    ///
    /// Columns follow [`Greek::with_price`], matching the Monte Carlo
    /// engine's layout.
    ///
    /// # Errors
    /// Only on a row-count mismatch, which cannot occur for columns computed
    /// from the same spot slice.
    pub fn calculate(&self, spots: &[f64], greeks: &[Greek]) -> Result<GreekTable, TableError> {
        let mut table = GreekTable::new(spots.len());
        for greek in Greek::with_price(greeks) {
            table.insert(greek, self.value(greek, spots))?;
        }
        Ok(table)
    }
}

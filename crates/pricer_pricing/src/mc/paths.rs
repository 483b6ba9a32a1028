//! Terminal price simulation under Geometric Brownian Motion.
//!
//! European payoffs only need the price at maturity, so each path is a
//! single exact step:
//!
//! ```text
//! S_T = S · exp((r − σ²/2)T + σ√T · Z)
//! ```
//!
//! The growth factor `exp(...)` is independent of spot, so it is computed
//! once per parameter set and multiplied into every spot scenario. Spot
//! bumps reuse the base factors; volatility, rate and maturity bumps build
//! new factors from the same draws.

use pricer_models::instruments::OptionSpec;

use super::matrix::PathMatrix;
use crate::rng::DrawBatch;

/// Non-spot model parameters that generate one path set.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{ParameterBump, PathParams};
///
/// let base = PathParams::new(0.2, 0.05, 1.0);
/// let bumped = base.bumped(ParameterBump::Maturity(-1.0 / 365.0));
/// assert!(bumped.discount_factor() > base.discount_factor());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathParams {
    /// Volatility (σ) - annualised.
    pub volatility: f64,
    /// Risk-free rate (r) - annualised.
    pub rate: f64,
    /// Time to maturity (T) - in years.
    pub maturity: f64,
}

/// An absolute shift applied to one path parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterBump {
    /// Shift σ.
    Volatility(f64),
    /// Shift r.
    Rate(f64),
    /// Shift T.
    Maturity(f64),
}

impl PathParams {
    /// Creates new path parameters.
    #[inline]
    pub fn new(volatility: f64, rate: f64, maturity: f64) -> Self {
        Self {
            volatility,
            rate,
            maturity,
        }
    }

    /// Parameters of an option description.
    #[inline]
    pub fn from_spec(spec: &OptionSpec) -> Self {
        Self::new(spec.volatility(), spec.rate(), spec.maturity())
    }

    /// (r − σ²/2)T.
    #[inline]
    pub fn drift(&self) -> f64 {
        (self.rate - 0.5 * self.volatility * self.volatility) * self.maturity
    }

    /// σ√T.
    #[inline]
    pub fn diffusion(&self) -> f64 {
        self.volatility * self.maturity.sqrt()
    }

    /// e^(−rT) for this parameter set.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Copy with one parameter shifted.
    ///
    /// Drift, diffusion and discount factor are derived on demand, so a
    /// bumped set can never carry terms from the unbumped one.
    pub fn bumped(&self, bump: ParameterBump) -> Self {
        let mut out = *self;
        match bump {
            ParameterBump::Volatility(dv) => out.volatility += dv,
            ParameterBump::Rate(dr) => out.rate += dr,
            ParameterBump::Maturity(dt) => out.maturity += dt,
        }
        out
    }
}

/// Per-draw multipliers exp((r − σ²/2)T + σ√T·Z) for one parameter set.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthFactors {
    values: Vec<f64>,
}

impl GrowthFactors {
    /// Multipliers in draw order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Terminal prices: one row per spot, one column per draw.
    pub fn terminal_prices(&self, spots: &[f64]) -> PathMatrix {
        PathMatrix::from_row_fn(spots.len(), self.values.len(), |i, row| {
            let spot = spots[i];
            for (s_t, &m) in row.iter_mut().zip(&self.values) {
                *s_t = spot * m;
            }
        })
    }
}

/// Builds terminal price matrices from one shared draw batch.
///
/// Borrowing the batch ties every path set built in a pricing call to the
/// same draws, which keeps finite differences on common random numbers.
#[derive(Clone, Copy, Debug)]
pub struct TerminalPricePathEngine<'a> {
    draws: &'a DrawBatch,
}

impl<'a> TerminalPricePathEngine<'a> {
    /// Creates an engine over `draws`.
    #[inline]
    pub fn new(draws: &'a DrawBatch) -> Self {
        Self { draws }
    }

    /// Number of paths per scenario.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.draws.len()
    }

    /// Growth factors for `params`.
    pub fn growth_factors(&self, params: &PathParams) -> GrowthFactors {
        let diffusion = params.diffusion();
        let drift = params.drift();
        let values = self
            .draws
            .as_slice()
            .iter()
            .map(|&z| (z * diffusion + drift).exp())
            .collect();
        GrowthFactors { values }
    }

    /// Terminal prices for `spots` under `params`.
    pub fn terminal_prices(&self, spots: &[f64], params: &PathParams) -> PathMatrix {
        self.growth_factors(params).terminal_prices(spots)
    }
}

//! Monte Carlo pricer with finite-difference Greeks.
//!
//! This module provides [`MonteCarloPricer`], which orchestrates:
//! 1. One [`DrawBatch`] per pricing call from the configured provider
//! 2. Base terminal prices and discounted payoffs
//! 3. Bump-and-revalue for each requested Greek on the same draws
//! 4. Per-spot mean and population standard deviation of every estimator
//!
//! # Bumps
//!
//! | Greek | Bump | Estimator per path |
//! |-------|------|--------------------|
//! | Delta | S + 1%·S | (V(S+ΔS) − V(S)) / ΔS |
//! | Gamma | S ± 1%·S | (V(S+ΔS) − 2V(S) + V(S−ΔS)) / ΔS² |
//! | Vega | σ + 0.0001 | (V(σ+Δσ) − V(σ)) · 0.01 / Δσ |
//! | Theta | T − 1/365 | V(T−ΔT) − V(T) |
//! | Rho | r + 0.0001 | (V(r+Δr) − V(r)) · 0.01 / Δr |
//!
//! Gamma's second difference is noisy for far out-of-the-money spots and
//! small iteration counts; its standard deviation says how far to trust it.

use std::fmt;
use std::sync::Arc;

use pricer_core::types::{DispersionTable, Greek, GreekTable, TableError};
use pricer_models::instruments::OptionSpec;
use tracing::{debug, warn};

use super::config::MonteCarloConfig;
use super::error::ConfigError;
use super::matrix::PathMatrix;
use super::paths::{GrowthFactors, ParameterBump, PathParams, TerminalPricePathEngine};
use super::payoff::PayoffValuator;
use crate::rng::{DrawBatch, EntropyDrawProvider, RandomDrawProvider, SeededDrawProvider};

/// Relative spot bump for Delta and Gamma.
pub const SPOT_BUMP: f64 = 0.01;

/// Absolute volatility bump for Vega.
pub const VOLATILITY_BUMP: f64 = 0.0001;

/// Absolute rate bump for Rho.
pub const RATE_BUMP: f64 = 0.0001;

/// Maturity shift for Theta: one calendar day.
///
/// For maturities under one day the shifted T is negative, √T is NaN, and
/// theta comes back NaN for every spot. It is not clamped to expiry.
pub const THETA_BUMP: f64 = -1.0 / 365.0;

/// Scale from a unit move to a one percentage point move.
const PER_POINT: f64 = 0.01;

/// Mean and standard deviation of one estimator, per spot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    /// Sample mean across draws.
    pub mean: Vec<f64>,
    /// Population standard deviation across draws.
    pub std_dev: Vec<f64>,
}

impl Estimate {
    fn from_paths(paths: &PathMatrix) -> Self {
        let (mean, std_dev) = paths.row_mean_std();
        Self { mean, std_dev }
    }

    /// Splits into `(mean, std_dev)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.mean, self.std_dev)
    }
}

/// Monte Carlo pricer for a European option.
///
/// Immutable after construction, so one instance can be shared behind an
/// `Arc` by several tasks. Each pricing call requests exactly one draw
/// batch and every bump within the call reuses it.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionKind, OptionSpec};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Call).unwrap();
/// let config = MonteCarloConfig::builder()
///     .n_iterations(20_000)
///     .seed(42)
///     .build()
///     .unwrap();
/// let pricer = MonteCarloPricer::new(spec, config).unwrap();
///
/// let price = pricer.price(&[45.0, 65.0]);
/// assert_eq!(price.mean.len(), 2);
/// assert!(price.mean[1] > price.mean[0]);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    spec: OptionSpec,
    config: MonteCarloConfig,
    provider: Arc<dyn RandomDrawProvider>,
}

impl MonteCarloPricer {
    /// Creates a pricer drawing from a seeded provider if the configuration
    /// carries a seed, otherwise from fresh entropy on every call.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(spec: OptionSpec, config: MonteCarloConfig) -> Result<Self, ConfigError> {
        let provider: Arc<dyn RandomDrawProvider> = match config.seed() {
            Some(seed) => Arc::new(SeededDrawProvider::new(seed)),
            None => Arc::new(EntropyDrawProvider),
        };
        Self::with_provider(spec, config, provider)
    }

    /// Creates a pricer with an explicit draw provider. Any seed in the
    /// configuration is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn with_provider(
        spec: OptionSpec,
        config: MonteCarloConfig,
        provider: Arc<dyn RandomDrawProvider>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            spec,
            config,
            provider,
        })
    }

    /// Returns the option description.
    #[inline]
    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    /// Returns the simulation configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns the number of draws per call.
    #[inline]
    pub fn n_iterations(&self) -> usize {
        self.config.n_iterations()
    }

    /// Discounted payoff mean and dispersion per spot.
    pub fn price(&self, spots: &[f64]) -> Estimate {
        self.estimate(Greek::Price, spots)
    }

    /// Forward-difference delta per spot.
    pub fn delta(&self, spots: &[f64]) -> Estimate {
        self.estimate(Greek::Delta, spots)
    }

    /// Second-difference gamma per spot.
    pub fn gamma(&self, spots: &[f64]) -> Estimate {
        self.estimate(Greek::Gamma, spots)
    }

    /// Vega per one point of volatility, per spot.
    pub fn vega(&self, spots: &[f64]) -> Estimate {
        self.estimate(Greek::Vega, spots)
    }

    /// One calendar day of decay per spot.
    ///
    /// NaN when the maturity is shorter than one day; see [`THETA_BUMP`].
    pub fn theta(&self, spots: &[f64]) -> Estimate {
        self.estimate(Greek::Theta, spots)
    }

    /// Rho per one point of rate, per spot.
    pub fn rho(&self, spots: &[f64]) -> Estimate {
        self.estimate(Greek::Rho, spots)
    }

    /// One Greek on a fresh draw batch.
    pub fn estimate(&self, greek: Greek, spots: &[f64]) -> Estimate {
        let draws = self.draw();
        Revaluation::new(&self.spec, spots, &draws).estimate(greek)
    }

    /// Price plus the requested Greeks on one shared draw batch.
    ///
    /// Columns follow [`Greek::with_price`]; the dispersion table carries
    /// the same keys.
    ///
    /// # Errors
    ///
    /// Only on a row-count mismatch, which cannot occur for columns computed
    /// from the same spot slice.
    pub fn calculate(
        &self,
        spots: &[f64],
        greeks: &[Greek],
    ) -> Result<(GreekTable, DispersionTable), TableError> {
        let columns = Greek::with_price(greeks);
        debug!(
            spots = spots.len(),
            n_iterations = self.n_iterations(),
            greeks = ?columns,
            "Monte Carlo valuation"
        );

        let draws = self.draw();
        let revaluation = Revaluation::new(&self.spec, spots, &draws);

        let mut values = GreekTable::new(spots.len());
        let mut dispersion = DispersionTable::new(spots.len());
        for greek in columns {
            let (mean, std_dev) = revaluation.estimate(greek).into_parts();
            values.insert(greek, mean)?;
            dispersion.insert(greek, std_dev)?;
        }
        Ok((values, dispersion))
    }

    fn draw(&self) -> DrawBatch {
        let draws = self.provider.draw(self.n_iterations());
        if draws.has_non_finite() {
            warn!(
                n_iterations = self.n_iterations(),
                "draw batch contains non-finite values; estimates will be NaN"
            );
        }
        draws
    }
}

impl fmt::Display for MonteCarloPricer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.spec;
        write!(
            f,
            "MonteCarloOption: [Strike:{}; Vol:{}; RFRate:{}; Time:{}; IsCall:{}; NoIter:{}]",
            s.strike(),
            s.volatility(),
            s.rate(),
            s.maturity(),
            s.kind().is_call(),
            self.n_iterations()
        )
    }
}

/// Base paths for one pricing call, shared by every bump.
struct Revaluation<'a> {
    spots: &'a [f64],
    engine: TerminalPricePathEngine<'a>,
    valuator: PayoffValuator,
    base: PathParams,
    base_factors: GrowthFactors,
    base_pv: PathMatrix,
}

impl<'a> Revaluation<'a> {
    fn new(spec: &OptionSpec, spots: &'a [f64], draws: &'a DrawBatch) -> Self {
        let engine = TerminalPricePathEngine::new(draws);
        let valuator = PayoffValuator::from_spec(spec);
        let base = PathParams::from_spec(spec);
        let base_factors = engine.growth_factors(&base);
        let base_pv = valuator.value(
            &base_factors.terminal_prices(spots),
            base.discount_factor(),
        );
        Self {
            spots,
            engine,
            valuator,
            base,
            base_factors,
            base_pv,
        }
    }

    fn estimate(&self, greek: Greek) -> Estimate {
        match greek {
            Greek::Price => Estimate::from_paths(&self.base_pv),
            Greek::Delta => self.delta(),
            Greek::Gamma => self.gamma(),
            Greek::Vega => self.parameter_greek(
                ParameterBump::Volatility(VOLATILITY_BUMP),
                PER_POINT / VOLATILITY_BUMP,
            ),
            Greek::Theta => {
                if self.base.maturity + THETA_BUMP < 0.0 {
                    warn!(
                        maturity = self.base.maturity,
                        "maturity shorter than the theta shift; theta will be NaN"
                    );
                }
                self.parameter_greek(ParameterBump::Maturity(THETA_BUMP), 1.0)
            }
            Greek::Rho => {
                self.parameter_greek(ParameterBump::Rate(RATE_BUMP), PER_POINT / RATE_BUMP)
            }
        }
    }

    /// Payoffs at shifted spots on the base growth factors.
    fn pv_at_spots(&self, spots: &[f64]) -> PathMatrix {
        self.valuator.value(
            &self.base_factors.terminal_prices(spots),
            self.base.discount_factor(),
        )
    }

    fn spot_bumps(&self) -> Vec<f64> {
        self.spots.iter().map(|s| s * SPOT_BUMP).collect()
    }

    fn delta(&self) -> Estimate {
        let bumps = self.spot_bumps();
        let up: Vec<f64> = self.spots.iter().zip(&bumps).map(|(s, h)| s + h).collect();
        let pv_up = self.pv_at_spots(&up);
        let paths = pv_up.zip_map(&self.base_pv, |i, bumped, base| (bumped - base) / bumps[i]);
        Estimate::from_paths(&paths)
    }

    fn gamma(&self) -> Estimate {
        let bumps = self.spot_bumps();
        let up: Vec<f64> = self.spots.iter().zip(&bumps).map(|(s, h)| s + h).collect();
        let down: Vec<f64> = self.spots.iter().zip(&bumps).map(|(s, h)| s - h).collect();
        let pv_up = self.pv_at_spots(&up);
        let pv_down = self.pv_at_spots(&down);
        let paths = pv_up.zip3_map(&self.base_pv, &pv_down, |i, plus, base, minus| {
            (plus - 2.0 * base + minus) / (bumps[i] * bumps[i])
        });
        Estimate::from_paths(&paths)
    }

    /// Revalues under bumped (σ, r, T) with fresh growth factors and the
    /// bumped discount factor, then scales the difference.
    fn parameter_greek(&self, bump: ParameterBump, scale: f64) -> Estimate {
        let bumped = self.base.bumped(bump);
        let factors = self.engine.growth_factors(&bumped);
        let pv = self
            .valuator
            .value(&factors.terminal_prices(self.spots), bumped.discount_factor());
        let paths = pv.zip_map(&self.base_pv, |_, bumped, base| (bumped - base) * scale);
        Estimate::from_paths(&paths)
    }
}

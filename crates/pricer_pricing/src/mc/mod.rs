//! Monte Carlo pricing for European options.
//!
//! This module provides the simulation engine that is cross-checked
//! against the closed-form prices in `pricer_models`.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig         (iteration count, optional seed)
//! ├── RandomDrawProvider       (one DrawBatch per call)
//! └── Revaluation (per call)
//!     ├── TerminalPricePathEngine  S_T = S·exp(drift + σ√T·Z)
//!     ├── PayoffValuator           max(±(S_T − K), 0)·DF
//!     └── bumped path sets         Delta, Gamma, Vega, Theta, Rho
//! ```
//!
//! # Common Random Numbers
//!
//! Every bumped path set in a call is built from the same draws and is
//! differenced against the same base payoff matrix. Only the quantity being
//! bumped changes between the two, which is what keeps the finite-difference
//! estimators usable at moderate iteration counts.
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::Greek;
//! use pricer_models::instruments::{OptionKind, OptionSpec};
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Put).unwrap();
//! let config = MonteCarloConfig::builder()
//!     .n_iterations(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let pricer = MonteCarloPricer::new(spec, config).unwrap();
//!
//! let (values, dispersion) = pricer
//!     .calculate(&[45.0, 55.0], &[Greek::Delta, Greek::Vega])
//!     .unwrap();
//! println!("Delta: {:?} ± {:?}", values.get(Greek::Delta), dispersion.get(Greek::Delta));
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod paths;
pub mod payoff;
pub mod pricer;

// Re-exports for convenient access
pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, MAX_ITERATIONS};
pub use error::ConfigError;
pub use matrix::PathMatrix;
pub use paths::{GrowthFactors, ParameterBump, PathParams, TerminalPricePathEngine};
pub use payoff::PayoffValuator;
pub use pricer::{
    Estimate, MonteCarloPricer, RATE_BUMP, SPOT_BUMP, THETA_BUMP, VOLATILITY_BUMP,
};

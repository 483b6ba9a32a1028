//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - [`AnalyticPricer`]: Black-Scholes price and Greeks over a spot vector
//! - [`EuropeanBounds`] and [`intrinsic_value`]: model-free sanity checks
//! - [`norm_cdf`] and [`norm_pdf`]: standard normal helpers

pub mod black_scholes;
pub mod bounds;
pub mod distributions;

// Re-export main types at module level
pub use black_scholes::{AnalyticPricer, DAYS_PER_YEAR, PER_POINT};
pub use bounds::{intrinsic_value, EuropeanBounds};
pub use distributions::{norm_cdf, norm_pdf};

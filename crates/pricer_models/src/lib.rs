//! # Pricer Models (L2: Business Logic)
//!
//! European vanilla options and their closed-form valuation.
//!
//! This crate provides:
//! - Option definitions with eager validation (`instruments`)
//! - The Black-Scholes engine used as the reference for Monte Carlo
//!   estimates (`analytical`)
//! - No-arbitrage bounds and intrinsic value
//!
//! ## Design Principles
//!
//! - **Validate once**: an [`OptionSpec`](instruments::OptionSpec) cannot
//!   hold a non-positive strike, volatility or maturity
//! - **Vectorised over spots**: every formula takes a spot slice and returns
//!   a value per scenario
//! - **No clamping**: degenerate inputs surface as NaN/Inf

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;

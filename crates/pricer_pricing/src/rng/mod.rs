//! # Random Number Generation Infrastructure
//!
//! This module provides the random draws consumed by the Monte Carlo
//! engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: seeded generators and a fixed-sample provider
//! - **One batch per call**: the engine requests a single [`DrawBatch`] per
//!   pricing call and reuses it across every bump
//! - **Injectable**: the engine only sees `dyn RandomDrawProvider`
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper with seed management
//! - [`provider`]: The [`RandomDrawProvider`] trait and its implementations
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{PricerRng, RandomDrawProvider, SeededDrawProvider};
//!
//! // Direct sampling
//! let mut rng = PricerRng::from_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//!
//! // Batched sampling through a provider
//! let provider = SeededDrawProvider::new(12345);
//! let batch = provider.draw(1000);
//! assert_eq!(batch.as_slice(), buffer.as_slice());
//! ```

pub mod prng;
pub mod provider;

// Public re-exports
pub use prng::PricerRng;
pub use provider::{
    DrawBatch, EntropyDrawProvider, FixedDrawProvider, RandomDrawProvider, SeededDrawProvider,
};

//! # pricer_pricing: Monte Carlo Engine and Simulation Tasks
//!
//! ## Layer 3 Role
//!
//! pricer_pricing prices the instruments defined in Layer 2 by simulation:
//! - [`rng`]: standard-normal draw providers (seeded, entropy, fixed)
//! - [`mc`]: terminal-price paths under geometric Brownian motion,
//!   discounted payoffs and bump-and-revalue Greeks with their standard
//!   deviations
//! - [`task`]: asynchronous workers wrapping a pricer behind submit/retrieve
//!   channels, and batches merging several instruments
//!
//! ## Common Random Numbers
//!
//! Every pricing call requests exactly one draw batch. The base paths and
//! every bumped path set within the call are built from that same batch, so
//! finite differences cancel most of the sampling noise.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::Greek;
//! use pricer_models::analytical::AnalyticPricer;
//! use pricer_models::instruments::{OptionKind, OptionSpec};
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Call).unwrap();
//! let config = MonteCarloConfig::builder()
//!     .n_iterations(100_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mc = MonteCarloPricer::new(spec, config).unwrap();
//! let analytic = AnalyticPricer::new(spec);
//!
//! let (values, dispersion) = mc.calculate(&[50.0], &[Greek::Delta]).unwrap();
//! let error = (values.get(Greek::Price).unwrap()[0] - analytic.price(&[50.0])[0]).abs();
//! let std_dev = dispersion.get(Greek::Price).unwrap()[0];
//! assert!(error < 0.1 * std_dev);
//! ```
//!
//! ## Runtime
//!
//! [`task::SimulationTask::start`] spawns onto the ambient Tokio runtime and
//! moves pricing onto the blocking pool. Synchronous entry points
//! ([`mc::MonteCarloPricer::calculate`], [`task::SimulationBatch::run_synchronous`])
//! need no runtime. Row-wise path kernels run on the rayon global pool.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;
pub mod task;

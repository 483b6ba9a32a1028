//! # pricer_core: Shared Result Types for Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace. It defines the
//! vocabulary both pricing engines report in:
//! - The [`Greek`](types::Greek) tag for Price, Delta, Gamma, Vega, Theta, Rho
//! - Ordered result tables: [`GreekTable`](types::GreekTable) for point
//!   estimates and [`DispersionTable`](types::DispersionTable) for Monte
//!   Carlo standard deviations
//! - Merge rules for combining instruments (sum values, never sum
//!   dispersions)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{DispersionTable, Greek, GreekTable};
//!
//! let mut call = GreekTable::new(1);
//! call.insert(Greek::Price, vec![4.0]).unwrap();
//! let mut put = GreekTable::new(1);
//! put.insert(Greek::Price, vec![3.0]).unwrap();
//! call.accumulate(&put).unwrap();
//! assert_eq!(call.get(Greek::Price), Some(&[7.0][..]));
//!
//! let mut std_call = DispersionTable::new(1);
//! std_call.insert(Greek::Price, vec![0.1]).unwrap();
//! let std_put = std_call.clone();
//! std_call.absorb(&std_put).unwrap();
//! assert!(std_call.is_undefined(Greek::Price));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Greek` and the result tables

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;

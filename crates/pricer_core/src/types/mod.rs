//! Result vocabulary shared by every pricing engine.
//!
//! - `greek`: the closed [`Greek`] tag set and its column labels
//! - `table`: ordered [`GreekTable`] and [`DispersionTable`] keyed by Greek
//! - `error`: [`TableError`] for length mismatches and unknown names

pub mod error;
pub mod greek;
pub mod table;

pub use error::TableError;
pub use greek::Greek;
pub use table::{DispersionTable, GreekTable};

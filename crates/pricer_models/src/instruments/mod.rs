//! European vanilla option definitions.
//!
//! - [`OptionKind`]: call or put, with the payoff sign and intrinsic value
//! - [`OptionSpec`]: validated strike, volatility, rate, maturity and kind
//! - [`InstrumentError`]: construction failures

pub mod error;
pub mod params;
pub mod payoff;

pub use error::InstrumentError;
pub use params::OptionSpec;
pub use payoff::OptionKind;

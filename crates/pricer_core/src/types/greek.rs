//! Greek identifiers.
//!
//! [`Greek`] is the closed set of quantities the pricing engines report. It
//! doubles as the column key of [`GreekTable`](super::GreekTable) and
//! [`DispersionTable`](super::DispersionTable), so an unknown sensitivity
//! name can only appear at a parsing boundary.

use std::fmt;
use std::str::FromStr;

use super::error::TableError;

/// A reported quantity: the option value or one of its sensitivities.
///
/// # Examples
/// ```
/// use pricer_core::types::Greek;
///
/// assert_eq!(Greek::Vega.name(), "Vega");
/// assert_eq!(Greek::Vega.std_name(), "VegaSTD");
/// assert_eq!("theta".parse::<Greek>().unwrap(), Greek::Theta);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Greek {
    /// Option value.
    Price,
    /// First derivative with respect to spot.
    Delta,
    /// Second derivative with respect to spot.
    Gamma,
    /// Sensitivity to a one point move in volatility.
    Vega,
    /// Value change over one calendar day.
    Theta,
    /// Sensitivity to a one point move in the risk-free rate.
    Rho,
}

impl Greek {
    /// Every Greek in canonical column order.
    pub const ALL: [Greek; 6] = [
        Greek::Price,
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
    ];

    /// Column name used in result tables.
    pub fn name(&self) -> &'static str {
        match self {
            Greek::Price => "Price",
            Greek::Delta => "Delta",
            Greek::Gamma => "Gamma",
            Greek::Vega => "Vega",
            Greek::Theta => "Theta",
            Greek::Rho => "Rho",
        }
    }

    /// Column name of the matching standard deviation, e.g. `"PriceSTD"`.
    pub fn std_name(&self) -> &'static str {
        match self {
            Greek::Price => "PriceSTD",
            Greek::Delta => "DeltaSTD",
            Greek::Gamma => "GammaSTD",
            Greek::Vega => "VegaSTD",
            Greek::Theta => "ThetaSTD",
            Greek::Rho => "RhoSTD",
        }
    }

    /// Normalises a request list: `Price` first, then each remaining Greek
    /// once, in request order.
    ///
    /// ```
    /// use pricer_core::types::Greek;
    ///
    /// let cols = Greek::with_price(&[Greek::Rho, Greek::Price, Greek::Delta, Greek::Rho]);
    /// assert_eq!(cols, vec![Greek::Price, Greek::Rho, Greek::Delta]);
    /// ```
    pub fn with_price(requested: &[Greek]) -> Vec<Greek> {
        let mut columns = vec![Greek::Price];
        for greek in requested {
            if !columns.contains(greek) {
                columns.push(*greek);
            }
        }
        columns
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Greek {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Greek::ALL
            .iter()
            .find(|g| g.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| TableError::UnknownGreek(s.to_string()))
    }
}

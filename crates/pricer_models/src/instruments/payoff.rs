//! Vanilla payoff kinds.

use std::fmt;
use std::str::FromStr;

/// Exercise right of a vanilla option.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionKind;
///
/// assert_eq!(OptionKind::Call.intrinsic(60.0, 50.0), 10.0);
/// assert_eq!(OptionKind::Put.intrinsic(60.0, 50.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// True for [`OptionKind::Call`].
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// +1 for a call, -1 for a put. Multiplies `S - K` inside the payoff floor.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionKind::Call => 1.0,
            OptionKind::Put => -1.0,
        }
    }

    /// The opposite leg.
    #[inline]
    pub fn flipped(&self) -> Self {
        match self {
            OptionKind::Call => OptionKind::Put,
            OptionKind::Put => OptionKind::Call,
        }
    }

    /// Undiscounted exercise value max(±(S − K), 0).
    ///
    /// A NaN spot or strike yields NaN rather than 0, since `f64::max`
    /// would otherwise discard it.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        let moneyness = self.sign() * (spot - strike);
        if moneyness.is_nan() {
            moneyness
        } else {
            moneyness.max(0.0)
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            _ => Err(format!("Invalid option kind: {}", s)),
        }
    }
}

//! Discounted vanilla payoffs over simulated terminal prices.

use pricer_models::instruments::{OptionKind, OptionSpec};

use super::matrix::PathMatrix;

/// Maps terminal prices to max(±(S_T − K), 0) · DF.
///
/// The discount factor is an argument rather than a field: it must come
/// from the same (r, T) pair that generated the terminal prices, which
/// differs between the base and the rate/maturity bumped path sets.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PayoffValuator;
/// use pricer_models::instruments::OptionKind;
///
/// let put = PayoffValuator::new(OptionKind::Put, 50.0);
/// assert_eq!(put.discounted(40.0, 0.5), 5.0);
/// assert_eq!(put.discounted(60.0, 0.5), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PayoffValuator {
    kind: OptionKind,
    strike: f64,
}

impl PayoffValuator {
    /// Creates a valuator for the given kind and strike.
    #[inline]
    pub fn new(kind: OptionKind, strike: f64) -> Self {
        Self { kind, strike }
    }

    /// Valuator for an option description.
    #[inline]
    pub fn from_spec(spec: &OptionSpec) -> Self {
        Self::new(spec.kind(), spec.strike())
    }

    /// Discounted payoff of one terminal price.
    #[inline]
    pub fn discounted(&self, terminal: f64, discount_factor: f64) -> f64 {
        self.kind.intrinsic(terminal, self.strike) * discount_factor
    }

    /// Discounted payoff of every terminal price in the matrix.
    pub fn value(&self, terminal: &PathMatrix, discount_factor: f64) -> PathMatrix {
        terminal.map(|_, s_t| self.discounted(s_t, discount_factor))
    }
}

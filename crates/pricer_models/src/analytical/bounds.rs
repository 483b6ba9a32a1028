//! No-arbitrage bounds and intrinsic value for European options.
//!
//! These are model-free sanity checks used to validate either engine:
//! - Call: max(S − K·e^(−rT), 0) ≤ C ≤ S
//! - Put: max(K·e^(−rT) − S, 0) ≤ P ≤ K·e^(−rT)

use crate::instruments::{OptionKind, OptionSpec};

/// Lower and upper no-arbitrage bounds for one option.
///
/// # Examples
/// ```
/// use pricer_models::analytical::EuropeanBounds;
/// use pricer_models::instruments::{OptionKind, OptionSpec};
///
/// let spec = OptionSpec::new(50.0, 0.2, 0.0, 1.0, OptionKind::Call).unwrap();
/// let bounds = EuropeanBounds::new(&spec);
/// assert_eq!(bounds.lower(&[60.0]), vec![10.0]);
/// assert_eq!(bounds.upper(&[60.0]), vec![60.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanBounds {
    kind: OptionKind,
    discounted_strike: f64,
}

impl EuropeanBounds {
    /// Bounds for the option described by `spec`.
    pub fn new(spec: &OptionSpec) -> Self {
        Self {
            kind: spec.kind(),
            discounted_strike: spec.discounted_strike(),
        }
    }

    /// max(±(S − K·e^(−rT)), 0) per spot.
    pub fn lower(&self, spots: &[f64]) -> Vec<f64> {
        spots
            .iter()
            .map(|&s| self.kind.intrinsic(s, self.discounted_strike))
            .collect()
    }

    /// S for a call, K·e^(−rT) for a put.
    pub fn upper(&self, spots: &[f64]) -> Vec<f64> {
        match self.kind {
            OptionKind::Call => spots.to_vec(),
            OptionKind::Put => vec![self.discounted_strike; spots.len()],
        }
    }

    /// Indices of spots whose `prices` fall outside the bounds by more than `tolerance`.
    pub fn violations(&self, spots: &[f64], prices: &[f64], tolerance: f64) -> Vec<usize> {
        let lower = self.lower(spots);
        let upper = self.upper(spots);
        prices
            .iter()
            .enumerate()
            .filter(|&(i, &p)| p < lower[i] - tolerance || p > upper[i] + tolerance)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Undiscounted exercise value max(±(S − K), 0) per spot.
pub fn intrinsic_value(kind: OptionKind, strike: f64, spots: &[f64]) -> Vec<f64> {
    spots.iter().map(|&s| kind.intrinsic(s, strike)).collect()
}

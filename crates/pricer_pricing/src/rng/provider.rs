//! Injectable sources of standard normal draws.
//!
//! Every Monte Carlo call asks its [`RandomDrawProvider`] for exactly one
//! [`DrawBatch`] and reuses it for the base case and every bumped case.
//! Swapping the provider is how tests pin the draws.

use std::sync::Mutex;

use super::prng::PricerRng;

/// A fixed-size set of independent standard normal samples.
///
/// Immutable once drawn; the engine borrows it for every path construction
/// within a single pricing call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    values: Vec<f64>,
}

impl DrawBatch {
    /// Wraps pre-computed draws.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of draws.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the batch holds no draws.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The draws in generation order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// True if any draw is NaN or infinite.
    ///
    /// Non-finite draws are passed through to the estimates unchanged; this
    /// only lets callers log or reject them.
    pub fn has_non_finite(&self) -> bool {
        self.values.iter().any(|z| !z.is_finite())
    }
}

/// Source of standard normal batches for the Monte Carlo engine.
///
/// Implementations are shared across concurrent tasks, hence `&self` and
/// `Send + Sync`. No ordering is promised between batches requested from
/// different threads.
pub trait RandomDrawProvider: Send + Sync + std::fmt::Debug {
    /// Returns `n` independent standard normal samples.
    fn draw(&self, n: usize) -> DrawBatch;
}

/// Draws each batch from a freshly entropy-seeded [`PricerRng`].
///
/// The default provider: independent batches on every call, no shared
/// state between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyDrawProvider;

impl RandomDrawProvider for EntropyDrawProvider {
    fn draw(&self, n: usize) -> DrawBatch {
        let mut values = vec![0.0; n];
        PricerRng::from_entropy().fill_normal(&mut values);
        DrawBatch::new(values)
    }
}

/// Draws successive batches from one seeded [`PricerRng`].
///
/// A single-threaded sequence of calls is reproducible from the seed.
/// Under concurrent use the batches are still reproducible as a set, but
/// which caller receives which batch depends on scheduling.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{RandomDrawProvider, SeededDrawProvider};
///
/// let a = SeededDrawProvider::new(42);
/// let b = SeededDrawProvider::new(42);
/// assert_eq!(a.draw(16), b.draw(16));
/// ```
#[derive(Debug)]
pub struct SeededDrawProvider {
    rng: Mutex<PricerRng>,
}

impl SeededDrawProvider {
    /// Creates a provider whose sequence starts from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(PricerRng::from_seed(seed)),
        }
    }
}

impl RandomDrawProvider for SeededDrawProvider {
    fn draw(&self, n: usize) -> DrawBatch {
        let mut values = vec![0.0; n];
        // A panic elsewhere cannot leave the generator half-written.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.fill_normal(&mut values);
        DrawBatch::new(values)
    }
}

/// Returns the same sample on every call, cycling it when more draws are
/// requested than it holds.
///
/// Used for regression tests where every draw must be known in advance.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{FixedDrawProvider, RandomDrawProvider};
///
/// let provider = FixedDrawProvider::new(vec![-1.0, 0.0, 1.0]);
/// assert_eq!(provider.draw(5).as_slice(), &[-1.0, 0.0, 1.0, -1.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedDrawProvider {
    values: Vec<f64>,
}

impl FixedDrawProvider {
    /// Creates a provider replaying `values`.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl RandomDrawProvider for FixedDrawProvider {
    fn draw(&self, n: usize) -> DrawBatch {
        if self.values.is_empty() {
            return DrawBatch::new(vec![f64::NAN; n]);
        }
        DrawBatch::new(self.values.iter().copied().cycle().take(n).collect())
    }
}

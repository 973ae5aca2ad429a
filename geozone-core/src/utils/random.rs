#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;

/// A default seed which keeps clustering reproducible between runs.
pub const DEFAULT_SEED: u64 = 42;

/// Provides the way to use randomized values in generic way.
pub trait Random: Send + Sync {
    /// Returns RNG. Repeatable implementations return a generator in the same state on every call.
    fn get_rng(&self) -> StdRng;
}

/// A default random implementation.
#[derive(Clone, Debug, Default)]
pub struct DefaultRandom {
    seed: Option<u64>,
}

impl DefaultRandom {
    /// Creates a new instance of `DefaultRandom` with seed.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Creates a new instance of `DefaultRandom` with the default seed.
    pub fn new_repeatable() -> Self {
        Self::new_with_seed(DEFAULT_SEED)
    }
}

impl Random for DefaultRandom {
    fn get_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Returns an index sampled with probability proportional to its weight.
/// Returns `None` when all weights are zero or the slice is empty.
pub fn sample_weighted<R: Rng>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    let total = weights.iter().sum::<f64>();
    if !(total > 0.) {
        return None;
    }

    let mut target = rng.gen_range(0. ..total);

    weights
        .iter()
        .position(|&weight| {
            if target < weight {
                true
            } else {
                target -= weight;
                false
            }
        })
        // accumulated rounding error can leave a tiny remainder
        .or_else(|| weights.iter().rposition(|&weight| weight > 0.))
}

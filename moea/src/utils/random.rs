#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use crate::utils::compare_floats;
use rand::prelude::*;
use std::sync::Mutex;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max]
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the interval [min, max)
    fn uniform_real(&self, min: f64, max: f64) -> f64;

    /// Tests probability value in [0., 1.] range.
    fn is_hit(&self, probability: f64) -> bool {
        self.uniform_real(0., 1.) < probability.clamp(0., 1.)
    }

    /// Returns an index from collected with probability weight.
    /// Uses exponential distribution where the weights are the rate of the distribution (lambda)
    /// and selects the smallest sampled value.
    fn weighted(&self, weights: &[usize]) -> usize {
        weights
            .iter()
            .zip(0_usize..)
            .map(|(&weight, index)| (-self.uniform_real(0., 1.).ln() / weight as f64, index))
            .min_by(|a, b| compare_floats(a.0, b.0))
            .map_or(0, |(_, index)| index)
    }

    /// Returns `amount` distinct indices taken from `0..length` range in random order.
    fn sample_indices(&self, length: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(length);
        let mut indices = (0..length).collect::<Vec<_>>();

        (0..amount).for_each(|idx| {
            let other = self.uniform_int(idx as i32, length as i32 - 1) as usize;
            indices.swap(idx, other);
        });

        indices.truncate(amount);
        indices
    }
}

/// A default random implementation backed by a seedable generator.
pub struct DefaultRandom {
    rng: Mutex<StdRng>,
}

impl DefaultRandom {
    /// Creates a new instance of `DefaultRandom` with reproducible sequence defined by `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    /// Creates a new instance of `DefaultRandom` using given seed or entropy when seed is not set.
    pub fn new_with_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::default, Self::new_with_seed)
    }

    fn with_rng<R>(&self, action: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        action(&mut rng)
    }
}

impl Default for DefaultRandom {
    fn default() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }

        self.with_rng(|rng| rng.gen_range(min..=max))
    }

    fn uniform_real(&self, min: f64, max: f64) -> f64 {
        if (min - max).abs() < f64::EPSILON || min > max {
            return min;
        }

        self.with_rng(|rng| rng.gen_range(min..max))
    }

    fn is_hit(&self, probability: f64) -> bool {
        let probability = if probability.is_nan() { 0. } else { probability.clamp(0., 1.) };
        self.with_rng(|rng| rng.gen_bool(probability))
    }
}

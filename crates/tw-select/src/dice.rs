//! Randomness used for picks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform rolls.
///
/// Seeded implementations must be reproducible: the same seed gives the
/// same sequence of rolls.
pub trait RandomSource {
    /// Roll a value uniformly in `1..=upper_bound`. `upper_bound` is at least 1.
    fn roll_uniform(&mut self, upper_bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll_uniform(&mut self, upper_bound: usize) -> usize {
        (**self).roll_uniform(upper_bound)
    }
}

/// Dice backed by a [`StdRng`].
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// Dice with a fixed seed, for reproducible picks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Dice seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for Dice {
    fn roll_uniform(&mut self, upper_bound: usize) -> usize {
        self.rng.random_range(1..=upper_bound.max(1))
    }
}

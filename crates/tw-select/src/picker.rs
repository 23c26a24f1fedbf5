//! Uniform picks.

use tracing::trace;

use crate::dice::RandomSource;
use crate::error::{SelectError, SelectResult};
use crate::weight::{RarityTiers, weighted};

/// Picks items uniformly at random, one roll per pick.
#[derive(Debug, Clone)]
pub struct RandomPicker<R> {
    source: R,
}

impl<R: RandomSource> RandomPicker<R> {
    /// Create a picker that rolls with `source`.
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// The underlying random source.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Mutable access to the random source.
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Give back the random source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Pick one item. Rolls `1..=items.len()` exactly once.
    pub fn pick_one<'a, T>(&mut self, items: &'a [T]) -> SelectResult<&'a T> {
        if items.is_empty() {
            return Err(SelectError::EmptyInput);
        }

        let upper_bound = items.len();
        let roll = self.source.roll_uniform(upper_bound);
        trace!(roll, upper_bound, "rolled pick");

        roll.checked_sub(1)
            .and_then(|index| items.get(index))
            .ok_or(SelectError::RollOutOfRange { roll, upper_bound })
    }

    /// Pick one item from the rarity-weighted population of `tiers`.
    pub fn pick_weighted<T: Clone>(&mut self, tiers: &RarityTiers<T>) -> SelectResult<T> {
        if tiers.is_empty() {
            return Err(SelectError::EmptyInput);
        }
        let population = weighted(tiers);
        self.pick_one(&population).cloned()
    }
}

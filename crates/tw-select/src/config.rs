//! Configuration for a collection selector.

use serde::{Deserialize, Serialize};
use tw_tables::ExplodeOptions;

/// Configuration for a [`CollectionSelector`](crate::CollectionSelector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// RNG seed for reproducible picks.
    pub seed: u64,
    /// Depth limit for exploding collections. `None` = unbounded.
    pub max_explode_depth: Option<usize>,
    /// Attempts a [`Generator`](crate::Generator) makes before falling back
    /// to its default.
    pub max_generation_attempts: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_explode_depth: None,
            max_generation_attempts: crate::generator::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SelectorConfig {
    /// Read a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Bound explosion depth.
    pub fn with_max_explode_depth(mut self, depth: usize) -> Self {
        self.max_explode_depth = Some(depth);
        self
    }

    /// Set the generator's attempt budget.
    pub fn with_max_generation_attempts(mut self, attempts: usize) -> Self {
        self.max_generation_attempts = attempts;
        self
    }

    /// Explosion options derived from this configuration.
    pub fn explode_options(&self) -> ExplodeOptions {
        ExplodeOptions {
            max_depth: self.max_explode_depth,
        }
    }
}

//! Retry-until-valid generation with a fallback.
//!
//! A [`Generator`] keeps building candidates until one passes validation,
//! and hands back a default once its attempt budget runs out. Generators
//! nest: a build closure may run another generation of its own.

use tracing::{debug, warn};

use crate::config::SelectorConfig;

/// Attempts made when no budget is configured.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Builds values until one is valid, or falls back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    max_attempts: usize,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl Generator {
    /// A generator making at most `max_attempts` attempts (never fewer than one).
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// A generator with the attempt budget from `config`.
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::new(config.max_generation_attempts)
    }

    /// The attempt budget.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Call `build` until `is_valid` accepts the result, at most
    /// [`max_attempts`](Self::max_attempts) times. When every attempt is
    /// rejected the result of `build_default` is returned instead.
    ///
    /// `describe_failure` explains a rejected candidate in the debug log;
    /// `default_description` names the fallback in the warning.
    pub fn generate<T, B, V, D, F>(
        &self,
        mut build: B,
        mut is_valid: V,
        build_default: D,
        describe_failure: F,
        default_description: &str,
    ) -> T
    where
        B: FnMut() -> T,
        V: FnMut(&T) -> bool,
        D: FnOnce() -> T,
        F: Fn(&T) -> String,
    {
        debug!(max_attempts = self.max_attempts, "generating");

        for attempt in 1..=self.max_attempts {
            let candidate = build();
            if is_valid(&candidate) {
                debug!(attempt, "generated");
                return candidate;
            }
            debug!(attempt, reason = %describe_failure(&candidate), "rejected");
        }

        warn!(
            attempts = self.max_attempts,
            default = default_description,
            "no valid value, using default"
        );
        build_default()
    }
}

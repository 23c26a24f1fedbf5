//! Random and rarity-weighted selection for Tafelwerk.
//!
//! Provides a [`RandomSource`] abstraction with a seeded [`Dice`]
//! implementation, the rarity [`weight`] engine that turns four tiers into
//! one flat population, a uniform [`RandomPicker`], and the
//! [`CollectionSelector`] facade that combines these with table lookups.
//! Collections of structured entries are read through [`data`], and
//! [`Generator`] retries a build until it is valid.

pub mod config;
pub mod data;
pub mod dice;
pub mod error;
pub mod generator;
pub mod picker;
pub mod selector;
pub mod weight;

pub use config::SelectorConfig;
pub use data::{
    CollectionDataSelector, CollectionTypeAndAmountSelector, DataSelection, TypeAndAmountSelection,
};
pub use dice::{Dice, RandomSource};
pub use error::{SelectError, SelectResult};
pub use generator::{DEFAULT_MAX_ATTEMPTS, Generator};
pub use picker::RandomPicker;
pub use selector::CollectionSelector;
pub use weight::{Multipliers, RarityTiers, weighted};

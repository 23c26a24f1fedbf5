//! The collection selector.
//!
//! `CollectionSelector` is what content generators talk to: it reads
//! collections through a [`CollectionResolver`], explodes nested
//! collections, and makes uniform or rarity-weighted picks with its own
//! [`RandomPicker`].

use std::sync::Arc;

use indexmap::IndexSet;
use tw_tables::{CollectionResolver, Table, TableCache, TableKey, TableLoader};

use crate::config::SelectorConfig;
use crate::dice::{Dice, RandomSource};
use crate::error::SelectResult;
use crate::picker::RandomPicker;
use crate::weight::{RarityTiers, weighted};

/// Collection lookups and random picks over cached tables.
pub struct CollectionSelector<L, R = Dice> {
    resolver: CollectionResolver<L>,
    picker: RandomPicker<R>,
}

impl<L: TableLoader> CollectionSelector<L, Dice> {
    /// Build a selector over a shared cache, with dice and explosion
    /// limits taken from `config`.
    pub fn from_config(cache: Arc<TableCache<L>>, config: &SelectorConfig) -> Self {
        let resolver =
            CollectionResolver::new(cache).with_explode_options(config.explode_options());
        Self::new(resolver, RandomPicker::new(Dice::seeded(config.seed)))
    }
}

impl<L: TableLoader, R: RandomSource> CollectionSelector<L, R> {
    /// Combine a resolver and a picker.
    pub fn new(resolver: CollectionResolver<L>, picker: RandomPicker<R>) -> Self {
        Self { resolver, picker }
    }

    /// The resolver used for lookups.
    pub fn resolver(&self) -> &CollectionResolver<L> {
        &self.resolver
    }

    /// The picker used for random selection.
    pub fn picker(&self) -> &RandomPicker<R> {
        &self.picker
    }

    /// Entries of a collection.
    pub fn select_from(&self, key: &TableKey, name: &str) -> SelectResult<Vec<String>> {
        Ok(self.resolver.entries_of(key, name)?)
    }

    /// The whole table.
    pub fn select_all_from(&self, key: &TableKey) -> SelectResult<Arc<Table>> {
        Ok(self.resolver.all_entries(key)?)
    }

    /// Whether `name` is a collection of the table.
    pub fn is_collection(&self, key: &TableKey, name: &str) -> SelectResult<bool> {
        Ok(self.resolver.is_collection(key, name)?)
    }

    /// First collection containing `entry`, optionally restricted to `filters`.
    pub fn find_collection_of<S: AsRef<str>>(
        &self,
        key: &TableKey,
        entry: &str,
        filters: &[S],
    ) -> SelectResult<String> {
        Ok(self.resolver.find_collection_of(key, entry, filters)?)
    }

    /// Explode a collection, keeping each leaf once.
    pub fn explode(&self, key: &TableKey, name: &str) -> SelectResult<IndexSet<String>> {
        Ok(self.resolver.explode_unique(key, name)?)
    }

    /// Explode a collection, keeping one leaf per path that reaches it.
    pub fn explode_and_preserve_duplicates(
        &self,
        key: &TableKey,
        name: &str,
    ) -> SelectResult<Vec<String>> {
        Ok(self.resolver.explode_with_duplicates(key, name)?)
    }

    /// Concatenate already-resolved collections. See [`tw_tables::flatten`].
    pub fn flatten<S: AsRef<str>>(&self, collections: &Table, keys: &[S]) -> Vec<String> {
        tw_tables::flatten(collections, keys)
    }

    /// The weighted population for `tiers`. See [`crate::weight`].
    pub fn create_weighted<T: Clone>(&self, tiers: &RarityTiers<T>) -> Vec<T> {
        weighted(tiers)
    }

    /// A random entry of a collection.
    pub fn select_random_from(&mut self, key: &TableKey, name: &str) -> SelectResult<String> {
        let entries = self.resolver.entries_of(key, name)?;
        self.picker.pick_one(&entries).cloned()
    }

    /// A random item of `items`.
    pub fn select_random<'a, T>(&mut self, items: &'a [T]) -> SelectResult<&'a T> {
        self.picker.pick_one(items)
    }

    /// A random item drawn with rarity weighting.
    pub fn select_weighted<T: Clone>(&mut self, tiers: &RarityTiers<T>) -> SelectResult<T> {
        self.picker.pick_weighted(tiers)
    }
}

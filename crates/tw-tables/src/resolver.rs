//! Collection lookups over cached tables.

use std::sync::Arc;

use indexmap::IndexSet;

use crate::cache::TableCache;
use crate::error::{TableError, TableResult};
use crate::explode::{ExplodeOptions, Exploder};
use crate::loader::TableLoader;
use crate::table::{Table, TableKey};

/// Answers questions about collections, reading tables through a shared
/// [`TableCache`].
pub struct CollectionResolver<L> {
    cache: Arc<TableCache<L>>,
    explode_options: ExplodeOptions,
}

impl<L> Clone for CollectionResolver<L> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            explode_options: self.explode_options,
        }
    }
}

impl<L: TableLoader> CollectionResolver<L> {
    /// Create a resolver over a shared cache with unbounded explosion.
    pub fn new(cache: Arc<TableCache<L>>) -> Self {
        Self {
            cache,
            explode_options: ExplodeOptions::default(),
        }
    }

    /// Use these options for [`explode_unique`](Self::explode_unique) and
    /// [`explode_with_duplicates`](Self::explode_with_duplicates).
    pub fn with_explode_options(mut self, options: ExplodeOptions) -> Self {
        self.explode_options = options;
        self
    }

    /// The cache this resolver reads through.
    pub fn cache(&self) -> &Arc<TableCache<L>> {
        &self.cache
    }

    /// The whole table.
    pub fn all_entries(&self, key: &TableKey) -> TableResult<Arc<Table>> {
        self.cache.get(key)
    }

    /// Whether `name` is a collection of the table.
    pub fn is_collection(&self, key: &TableKey, name: &str) -> TableResult<bool> {
        Ok(self.all_entries(key)?.contains(name))
    }

    /// Entries of a collection, in table order.
    pub fn entries_of(&self, key: &TableKey, name: &str) -> TableResult<Vec<String>> {
        let table = self.all_entries(key)?;
        table
            .get(name)
            .map(<[String]>::to_vec)
            .ok_or_else(|| TableError::CollectionNotFound {
                table: key.clone(),
                collection: name.to_string(),
            })
    }

    /// Name of the first collection, in table order, whose entries include
    /// `entry`.
    ///
    /// When `filters` is non-empty only those collections are considered.
    /// If no collection at all lists the entry the error says so; if some
    /// do but none of the filtered ones, the error reports the filter count.
    pub fn find_collection_of<S: AsRef<str>>(
        &self,
        key: &TableKey,
        entry: &str,
        filters: &[S],
    ) -> TableResult<String> {
        let table = self.all_entries(key)?;
        let lists_entry = |entries: &[String]| entries.iter().any(|e| e == entry);

        if !table.iter().any(|(_, entries)| lists_entry(entries)) {
            return Err(TableError::EntryNotFound {
                table: key.clone(),
                entry: entry.to_string(),
            });
        }

        table
            .iter()
            .filter(|(name, _)| filters.is_empty() || filters.iter().any(|f| f.as_ref() == *name))
            .find(|(_, entries)| lists_entry(*entries))
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| TableError::EntryNotInFilters {
                table: key.clone(),
                entry: entry.to_string(),
                filters: filters.len(),
            })
    }

    /// Every leaf reachable from `name`, each once.
    ///
    /// See [`Exploder`] for the expansion rules and the cycle caveat.
    pub fn explode_unique(&self, key: &TableKey, name: &str) -> TableResult<IndexSet<String>> {
        let table = self.all_entries(key)?;
        Exploder::new(key, &table)
            .with_options(self.explode_options)
            .unique(name)
    }

    /// Every leaf reachable from `name`, once per path that reaches it.
    pub fn explode_with_duplicates(&self, key: &TableKey, name: &str) -> TableResult<Vec<String>> {
        let table = self.all_entries(key)?;
        Exploder::new(key, &table)
            .with_options(self.explode_options)
            .with_duplicates(name)
    }
}

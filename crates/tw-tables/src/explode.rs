//! Recursive expansion of collections.
//!
//! Exploding a collection replaces every entry that names another
//! collection of the same table with that collection's own exploded
//! entries, in place and in order. An entry equal to the name of the
//! collection currently being expanded is kept as a literal, so direct
//! self-reference terminates.
//!
//! Known limitation: indirect cycles (`a -> b -> a`) are not detected.
//! Unless a depth limit is set through [`ExplodeOptions`], they recurse
//! until the stack overflows. Recursion depth is the nesting depth of the
//! data, which is shallow for real tables.

use indexmap::IndexSet;
use tracing::trace;

use crate::error::{TableError, TableResult};
use crate::table::{Table, TableKey};

/// Tuning for explosion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplodeOptions {
    /// Maximum number of nested sub-collection expansions below the root.
    /// `None` (the default) means unbounded.
    pub max_depth: Option<usize>,
}

impl ExplodeOptions {
    /// Fail with [`TableError::DepthExceeded`] instead of recursing deeper
    /// than `depth` levels below the root.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Explodes collections of one loaded table.
#[derive(Debug, Clone, Copy)]
pub struct Exploder<'a> {
    key: &'a TableKey,
    table: &'a Table,
    options: ExplodeOptions,
}

impl<'a> Exploder<'a> {
    /// Explode within `table`; `key` only labels errors.
    pub fn new(key: &'a TableKey, table: &'a Table) -> Self {
        Self {
            key,
            table,
            options: ExplodeOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ExplodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Leaves reachable from `name`, each once, in first-encounter order.
    pub fn unique(&self, name: &str) -> TableResult<IndexSet<String>> {
        let mut leaves = IndexSet::new();
        self.explode_into(name, 0, &mut leaves)?;
        trace!(
            table = %self.key,
            collection = name,
            leaves = leaves.len(),
            "exploded"
        );
        Ok(leaves)
    }

    /// Leaves reachable from `name`, once per path, in encounter order.
    pub fn with_duplicates(&self, name: &str) -> TableResult<Vec<String>> {
        let mut leaves = Vec::new();
        self.explode_into(name, 0, &mut leaves)?;
        trace!(
            table = %self.key,
            collection = name,
            leaves = leaves.len(),
            "exploded with duplicates"
        );
        Ok(leaves)
    }

    fn explode_into<A>(&self, name: &str, depth: usize, leaves: &mut A) -> TableResult<()>
    where
        A: Extend<String>,
    {
        let entries = self
            .table
            .get(name)
            .ok_or_else(|| TableError::CollectionNotFound {
                table: self.key.clone(),
                collection: name.to_string(),
            })?;

        for entry in entries {
            if entry != name && self.table.contains(entry) {
                if let Some(max_depth) = self.options.max_depth.filter(|max| depth >= *max) {
                    return Err(TableError::DepthExceeded {
                        table: self.key.clone(),
                        collection: entry.clone(),
                        max_depth,
                    });
                }
                self.explode_into(entry, depth + 1, leaves)?;
            } else {
                leaves.extend(std::iter::once(entry.clone()));
            }
        }
        Ok(())
    }
}

/// Concatenate the entries of `keys` that are collections of `collections`.
///
/// Keys that are not collections contribute nothing. Nothing is exploded;
/// this is for data that was already resolved elsewhere, typically pieces
/// gathered from several tables.
pub fn flatten<S: AsRef<str>>(collections: &Table, keys: &[S]) -> Vec<String> {
    keys.iter()
        .filter_map(|key| collections.get(key.as_ref()))
        .flatten()
        .cloned()
        .collect()
}

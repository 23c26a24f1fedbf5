//! Error types for table lookups.

use crate::table::TableKey;

/// Opaque failure reported by a [`TableLoader`](crate::TableLoader).
pub type LoadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Alias for `Result<T, TableError>`.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur when reading collections from a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The requested collection is not a key of the table.
    #[error("{collection} is not a valid collection in the table {table}")]
    CollectionNotFound {
        /// The table that was searched.
        table: TableKey,
        /// The missing collection name.
        collection: String,
    },

    /// No collection in the table lists the entry.
    #[error("No collection in {table} contains {entry}")]
    EntryNotFound {
        /// The table that was searched.
        table: TableKey,
        /// The entry nobody contains.
        entry: String,
    },

    /// Some collection lists the entry, but none of the filtered ones do.
    #[error("No collection from the {filters} filters in {table} contains {entry}")]
    EntryNotInFilters {
        /// The table that was searched.
        table: TableKey,
        /// The entry that was looked for.
        entry: String,
        /// How many collection names the search was restricted to.
        filters: usize,
    },

    /// Explosion needed to go deeper than the configured bound.
    #[error("exploding {collection} in {table} exceeded the depth limit of {max_depth}")]
    DepthExceeded {
        /// The table being exploded.
        table: TableKey,
        /// The sub-collection that would have crossed the limit.
        collection: String,
        /// The configured limit.
        max_depth: usize,
    },

    /// The loader could not produce the table. Passed through untouched.
    #[error(transparent)]
    Load(LoadError),
}

impl TableError {
    /// Returns true for the lookup failures (missing collection or entry).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CollectionNotFound { .. }
                | Self::EntryNotFound { .. }
                | Self::EntryNotInFilters { .. }
        )
    }
}

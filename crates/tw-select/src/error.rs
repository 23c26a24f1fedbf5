//! Error types for selection.

use tw_tables::{TableError, TableKey};

/// Result type for selection operations.
pub type SelectResult<T> = Result<T, SelectError>;

/// Errors that can occur while selecting.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// Nothing to pick from: an empty list, or four empty rarity tiers.
    #[error("Cannot select random from an empty collection")]
    EmptyInput,

    /// The random source answered outside `1..=upper_bound`.
    #[error("random source rolled {roll}, outside 1..={upper_bound}")]
    RollOutOfRange {
        /// The value that came back.
        roll: usize,
        /// The bound that was asked for.
        upper_bound: usize,
    },

    /// An entry does not encode the expected record.
    #[error("invalid data entry '{entry}': {reason}")]
    InvalidData {
        /// The raw entry string.
        entry: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A collection expected to hold exactly one entry holds some other number.
    #[error("{collection} in {table} holds {count} entries, expected exactly one")]
    NotSingle {
        /// The table that was read.
        table: TableKey,
        /// The collection looked up.
        collection: String,
        /// How many entries it actually holds.
        count: usize,
    },

    /// Table lookup error.
    #[error(transparent)]
    Table(#[from] TableError),
}

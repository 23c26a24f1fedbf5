//! Table sources: the loader trait plus in-memory and JSON loaders.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::table::{Table, TableKey};

/// Source of tables. Implementations do the I/O and parsing; the cache
/// decides when to call them.
pub trait TableLoader: Send + Sync {
    /// Produce the table identified by `key`.
    fn load(&self, key: &TableKey) -> Result<Table, LoadError>;
}

/// Failures of the loaders shipped with this crate.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// No table is registered under the key.
    #[error("no table registered for {0}")]
    Missing(TableKey),

    /// The table file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The table file is not a JSON object of string arrays.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// File that was attempted.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Tables held in memory, registered up front.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    tables: HashMap<TableKey, Table>,
}

impl MemoryLoader {
    /// Create a loader with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with_table(mut self, key: TableKey, table: Table) -> Self {
        self.insert(key, table);
        self
    }

    /// Register (or replace) a table.
    pub fn insert(&mut self, key: TableKey, table: Table) {
        self.tables.insert(key, table);
    }
}

impl TableLoader for MemoryLoader {
    fn load(&self, key: &TableKey) -> Result<Table, LoadError> {
        self.tables
            .get(key)
            .cloned()
            .ok_or_else(|| LoaderError::Missing(key.clone()).into())
    }
}

/// Reads `<root>/<source>/<table>.json`, each file holding one table as a
/// JSON object of string arrays.
#[derive(Debug, Clone)]
pub struct JsonDirLoader {
    root: PathBuf,
}

impl JsonDirLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory tables are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a key resolves to.
    pub fn path_for(&self, key: &TableKey) -> PathBuf {
        self.root
            .join(&key.source)
            .join(format!("{}.json", key.table))
    }
}

impl TableLoader for JsonDirLoader {
    fn load(&self, key: &TableKey) -> Result<Table, LoadError> {
        let path = self.path_for(key);
        let text = fs::read_to_string(&path).map_err(|source| LoaderError::Read {
            path: path.clone(),
            source,
        })?;
        let table: Table = serde_json::from_str(&text)
            .map_err(|source| LoaderError::Parse { path, source })?;
        Ok(table)
    }
}

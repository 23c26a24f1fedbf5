//! Load-once table cache.
//!
//! The cache is an ordinary value owned by whoever assembles the
//! application; resolvers share it through an `Arc`. A single lock covers
//! the whole check/load/store step, so a key is loaded at most once even
//! when many threads ask for it at the same time. Callers asking for other
//! keys wait behind a load in progress; loads are expected to happen at
//! startup, so the coarse lock is acceptable.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{TableError, TableResult};
use crate::loader::TableLoader;
use crate::table::{Table, TableKey};

/// Memoizes a [`TableLoader`] per [`TableKey`].
pub struct TableCache<L> {
    loader: L,
    tables: Mutex<HashMap<TableKey, Arc<Table>>>,
}

impl<L: TableLoader> TableCache<L> {
    /// Wrap a loader. Nothing is loaded until the first [`get`](Self::get).
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// Return the table for `key`, loading it on first use.
    ///
    /// Every call for the same key returns the same `Arc`. A failed load is
    /// not remembered, so the next call tries the loader again.
    pub fn get(&self, key: &TableKey) -> TableResult<Arc<Table>> {
        let mut tables = self.tables.lock();
        if let Some(table) = tables.get(key) {
            return Ok(Arc::clone(table));
        }

        debug!(table = %key, "loading table");
        let table = Arc::new(self.loader.load(key).map_err(TableError::Load)?);
        debug!(table = %key, collections = table.len(), "cached table");
        tables.insert(key.clone(), Arc::clone(&table));
        Ok(table)
    }

    /// Whether `key` has already been loaded.
    pub fn contains(&self, key: &TableKey) -> bool {
        self.tables.lock().contains_key(key)
    }

    /// Number of loaded tables.
    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    /// True if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }

    /// The wrapped loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L> std::fmt::Debug for TableCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableCache")
            .field("loaded", &self.tables.lock().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    /// Counts loads and sleeps a little so concurrent callers overlap.
    struct CountingLoader {
        loads: AtomicUsize,
        fail: bool,
    }

    impl CountingLoader {
        fn new() -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn loads(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    impl TableLoader for CountingLoader {
        fn load(&self, key: &TableKey) -> Result<Table, LoadError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            if self.fail {
                return Err(format!("cannot open {key}").into());
            }
            Ok(Table::new().with(key.table.clone(), ["entry"]))
        }
    }

    #[test]
    fn loads_once_per_key() {
        let cache = TableCache::new(CountingLoader::new());
        let key = TableKey::new("core", "Gems");

        let first = cache.get(&key).unwrap();
        let second = cache.get(&key).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loader().loads(), 1);
        assert!(cache.contains(&key));
    }

    #[test]
    fn different_sources_load_separately() {
        let cache = TableCache::new(CountingLoader::new());
        cache.get(&TableKey::new("a", "Gems")).unwrap();
        cache.get(&TableKey::new("b", "Gems")).unwrap();
        assert_eq!(cache.loader().loads(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn concurrent_callers_share_one_load() {
        let cache = TableCache::new(CountingLoader::new());
        let key = TableKey::new("core", "Gems");

        let tables: Vec<Arc<Table>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| cache.get(&key).unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.loader().loads(), 1);
        assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
    }

    #[test]
    fn load_errors_pass_through_and_are_not_cached() {
        let cache = TableCache::new(CountingLoader::failing());
        let key = TableKey::new("core", "Gems");

        let err = cache.get(&key).unwrap_err();
        assert!(matches!(err, TableError::Load(_)));
        assert_eq!(err.to_string(), "cannot open core/Gems");
        assert!(cache.is_empty());

        cache.get(&key).unwrap_err();
        assert_eq!(cache.loader().loads(), 2);
    }
}

//! Collection tables for Tafelwerk.
//!
//! A table maps collection names to ordered entry lists. Any entry that is
//! itself a collection name in the same table is a sub-collection, which is
//! what [`explode`] expands. Tables come from a [`TableLoader`] and are
//! memoized per [`TableKey`] by a [`TableCache`] that the composition root
//! owns and hands to a [`CollectionResolver`].

pub mod cache;
pub mod error;
pub mod explode;
pub mod loader;
pub mod resolver;
pub mod table;

pub use cache::TableCache;
pub use error::{LoadError, TableError, TableResult};
pub use explode::{ExplodeOptions, Exploder, flatten};
pub use loader::{JsonDirLoader, LoaderError, MemoryLoader, TableLoader};
pub use resolver::CollectionResolver;
pub use table::{Table, TableKey};

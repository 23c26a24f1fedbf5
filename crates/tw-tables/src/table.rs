//! Table identity and the collection map.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identity of a table: the source it ships with plus its name.
///
/// Two keys with the same table name but different sources are different
/// tables and are cached separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableKey {
    /// The source (bundle, package, data set) that owns the table.
    pub source: String,
    /// The table name within that source.
    pub table: String,
}

impl TableKey {
    /// Create a key from a source and a table name.
    pub fn new(source: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.table)
    }
}

/// A mapping from collection name to its ordered entries.
///
/// Key order is insertion order and is the order lookups scan in. Entry
/// order is preserved exactly, duplicates included. Serializes as a plain
/// JSON object of string arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    collections: IndexMap<String, Vec<String>>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with<I, S>(mut self, name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, entries);
        self
    }

    /// Insert or replace a collection. A replaced collection keeps its position.
    pub fn insert<I, S>(&mut self, name: impl Into<String>, entries: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections
            .insert(name.into(), entries.into_iter().map(Into::into).collect())
    }

    /// Entries of a collection, if `name` is one.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// Whether `name` is a collection of this table.
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Collection names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// `(name, entries)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.collections
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// True if the table has no collections.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl<N, I, S> FromIterator<(N, I)> for Table
where
    N: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (name, entries) in iter {
            table.insert(name, entries);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display() {
        assert_eq!(TableKey::new("core", "Weapons").to_string(), "core/Weapons");
    }

    #[test]
    fn keys_differ_by_source() {
        assert_ne!(TableKey::new("a", "t"), TableKey::new("b", "t"));
    }

    #[test]
    fn preserves_insertion_order() {
        let table = Table::new()
            .with("zeta", ["1"])
            .with("alpha", ["2"])
            .with("mid", ["3"]);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_entries_are_kept() {
        let table = Table::new().with("dice", ["d6", "d6", "d20"]);
        assert_eq!(table.get("dice").map(<[String]>::len), Some(3));
    }

    #[test]
    fn contains_checks_keys_only() {
        let table = Table::new().with("entry", ["first", "second"]);
        assert!(table.contains("entry"));
        assert!(!table.contains("first"));
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let json = r#"{"b":["x","y"],"a":["z"]}"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(serde_json::to_string(&table).unwrap(), json);
    }

    #[test]
    fn collect_from_pairs() {
        let table: Table = vec![("one", vec!["a"]), ("two", vec!["b", "c"])]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("two"), Some(&["b".to_string(), "c".to_string()][..]));
    }
}

//! Structured records stored in collection entries.
//!
//! Some tables hold records rather than plain names: each entry packs a
//! few sections behind a separator, e.g. `Longsword@2` for a type and an
//! amount. [`DataSelection`] describes how a record is split and mapped,
//! [`CollectionDataSelector`] reads whole collections of them, and
//! [`CollectionTypeAndAmountSelector`] adds single and random picks for
//! the common type-and-amount shape.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;
use tw_tables::{CollectionResolver, TableCache, TableKey, TableLoader};

use crate::config::SelectorConfig;
use crate::dice::{Dice, RandomSource};
use crate::error::{SelectError, SelectResult};
use crate::picker::RandomPicker;

/// A record that can be read from one collection entry.
pub trait DataSelection: Sized {
    /// Number of sections in an entry.
    const SECTION_COUNT: usize;

    /// Separator between sections.
    const SEPARATOR: char = '@';

    /// Build the record from exactly [`SECTION_COUNT`](Self::SECTION_COUNT)
    /// sections. The error string says what is wrong with them.
    fn map(sections: &[&str]) -> Result<Self, String>;

    /// Split `entry` and map its sections.
    fn parse(entry: &str) -> SelectResult<Self> {
        let sections: Vec<&str> = entry.split(Self::SEPARATOR).collect();
        if sections.len() != Self::SECTION_COUNT {
            return Err(SelectError::InvalidData {
                entry: entry.to_string(),
                reason: format!(
                    "expected {} sections separated by '{}', found {}",
                    Self::SECTION_COUNT,
                    Self::SEPARATOR,
                    sections.len()
                ),
            });
        }
        Self::map(&sections).map_err(|reason| SelectError::InvalidData {
            entry: entry.to_string(),
            reason,
        })
    }
}

/// Reads collections whose entries are `T` records.
pub struct CollectionDataSelector<L, T> {
    resolver: CollectionResolver<L>,
    record: PhantomData<fn() -> T>,
}

impl<L: TableLoader, T: DataSelection> CollectionDataSelector<L, T> {
    /// Read records through `resolver`.
    pub fn new(resolver: CollectionResolver<L>) -> Self {
        Self {
            resolver,
            record: PhantomData,
        }
    }

    /// The resolver used for lookups.
    pub fn resolver(&self) -> &CollectionResolver<L> {
        &self.resolver
    }

    /// Records of a collection, in entry order.
    pub fn select_from(&self, key: &TableKey, collection: &str) -> SelectResult<Vec<T>> {
        self.resolver
            .entries_of(key, collection)?
            .iter()
            .map(|entry| T::parse(entry))
            .collect()
    }

    /// Records of every collection in the table, in table order.
    pub fn select_all_from(&self, key: &TableKey) -> SelectResult<IndexMap<String, Vec<T>>> {
        let table = self.resolver.all_entries(key)?;
        table
            .iter()
            .map(|(name, entries)| {
                let records = entries
                    .iter()
                    .map(|entry| T::parse(entry))
                    .collect::<SelectResult<Vec<T>>>()?;
                Ok((name.to_string(), records))
            })
            .collect()
    }

    /// Whether `name` is a collection of the table.
    pub fn is_collection(&self, key: &TableKey, name: &str) -> SelectResult<bool> {
        Ok(self.resolver.is_collection(key, name)?)
    }
}

/// A thing and how many of it, stored as `kind@amount`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeAndAmountSelection {
    /// What is selected.
    pub kind: String,
    /// How many.
    pub amount: u32,
}

impl DataSelection for TypeAndAmountSelection {
    const SECTION_COUNT: usize = 2;

    fn map(sections: &[&str]) -> Result<Self, String> {
        let [kind, amount] = sections else {
            return Err(format!("expected 2 sections, found {}", sections.len()));
        };
        if kind.is_empty() {
            return Err("type is empty".to_string());
        }
        let amount = amount
            .parse()
            .map_err(|err| format!("amount '{amount}' is not a count: {err}"))?;
        Ok(Self {
            kind: (*kind).to_string(),
            amount,
        })
    }
}

impl fmt::Display for TypeAndAmountSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.amount)
    }
}

/// Type-and-amount lookups with single and random picks.
pub struct CollectionTypeAndAmountSelector<L, R = Dice> {
    data: CollectionDataSelector<L, TypeAndAmountSelection>,
    picker: RandomPicker<R>,
}

impl<L: TableLoader> CollectionTypeAndAmountSelector<L, Dice> {
    /// Build a selector over a shared cache, with dice taken from `config`.
    pub fn from_config(cache: Arc<TableCache<L>>, config: &SelectorConfig) -> Self {
        let resolver =
            CollectionResolver::new(cache).with_explode_options(config.explode_options());
        Self::new(resolver, RandomPicker::new(Dice::seeded(config.seed)))
    }
}

impl<L: TableLoader, R: RandomSource> CollectionTypeAndAmountSelector<L, R> {
    /// Combine a resolver and a picker.
    pub fn new(resolver: CollectionResolver<L>, picker: RandomPicker<R>) -> Self {
        Self {
            data: CollectionDataSelector::new(resolver),
            picker,
        }
    }

    /// The picker used for random selection.
    pub fn picker(&self) -> &RandomPicker<R> {
        &self.picker
    }

    /// Selections of a collection, in entry order.
    pub fn select_from(
        &self,
        key: &TableKey,
        collection: &str,
    ) -> SelectResult<Vec<TypeAndAmountSelection>> {
        self.data.select_from(key, collection)
    }

    /// The only selection of a collection. Fails unless the collection
    /// holds exactly one entry.
    pub fn select_one_from(
        &self,
        key: &TableKey,
        collection: &str,
    ) -> SelectResult<TypeAndAmountSelection> {
        let mut selections = self.select_from(key, collection)?;
        let count = selections.len();
        match selections.pop() {
            Some(selection) if count == 1 => Ok(selection),
            _ => Err(SelectError::NotSingle {
                table: key.clone(),
                collection: collection.to_string(),
                count,
            }),
        }
    }

    /// Selections of every collection in the table.
    pub fn select_all_from(
        &self,
        key: &TableKey,
    ) -> SelectResult<IndexMap<String, Vec<TypeAndAmountSelection>>> {
        self.data.select_all_from(key)
    }

    /// Whether `name` is a collection of the table.
    pub fn is_collection(&self, key: &TableKey, name: &str) -> SelectResult<bool> {
        self.data.is_collection(key, name)
    }

    /// A random selection of a collection.
    pub fn select_random_from(
        &mut self,
        key: &TableKey,
        collection: &str,
    ) -> SelectResult<TypeAndAmountSelection> {
        let selections = self.select_from(key, collection)?;
        let selection = self.picker.pick_one(&selections)?.clone();
        trace!(%key, collection, %selection, "picked type and amount");
        Ok(selection)
    }
}

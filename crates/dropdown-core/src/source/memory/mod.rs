//! In-memory reference source.
//!
//! `MemoryStore` holds registered entity models and their entries;
//! `MemorySource` answers queries over one entity. Relations are stored as
//! the target's primary key and resolved on access, or up front when a query
//! joins them eagerly.

mod error;
mod row;
mod source;

#[cfg(test)]
mod tests;

use crate::{model::EntityModel, value::Value};
use std::{collections::BTreeMap, sync::Arc};

pub use error::MemoryError;
pub use row::MemoryRow;
pub use source::MemorySource;

///
/// Entry
/// One stored record: values keyed by canonical field name.
///

#[derive(Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) values: BTreeMap<String, Value>,
    pub(crate) display: Option<String>,
}

///
/// Table
///

#[derive(Debug)]
struct Table {
    model: EntityModel,
    entries: Vec<Entry>,
    by_key: BTreeMap<Value, usize>,
}

///
/// MemoryStore
///
/// Entity models plus their entries. Built once, then shared read-only
/// through `Arc` by every source and row that reads it.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, Table>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity model. Relation targets may be registered later.
    pub fn register(&mut self, model: EntityModel) -> Result<(), MemoryError> {
        if self.tables.contains_key(&model.name) {
            return Err(MemoryError::DuplicateEntity { entity: model.name });
        }

        self.tables.insert(
            model.name.clone(),
            Table {
                model,
                entries: Vec::new(),
                by_key: BTreeMap::new(),
            },
        );

        Ok(())
    }

    /// Insert one entry; its display text is the `<entity> object (<pk>)`
    /// fallback.
    pub fn insert<I, K, V>(&mut self, entity: &str, values: I) -> Result<(), MemoryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.insert_entry(entity, None, values)
    }

    /// Insert one entry with an explicit display text.
    pub fn insert_displayed<I, K, V>(
        &mut self,
        entity: &str,
        display: impl Into<String>,
        values: I,
    ) -> Result<(), MemoryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.insert_entry(entity, Some(display.into()), values)
    }

    fn insert_entry<I, K, V>(
        &mut self,
        entity: &str,
        display: Option<String>,
        values: I,
    ) -> Result<(), MemoryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let table = self
            .tables
            .get_mut(entity)
            .ok_or_else(|| MemoryError::UnknownEntity {
                entity: entity.to_string(),
            })?;

        // unset fields read as NULL
        let mut stored: BTreeMap<String, Value> = table
            .model
            .fields
            .iter()
            .map(|field| (field.name.clone(), Value::Null))
            .collect();

        for (name, value) in values {
            let field = table.model.get_field(name.as_ref()).ok_or_else(|| {
                MemoryError::UnknownField {
                    entity: entity.to_string(),
                    field: name.as_ref().to_string(),
                }
            })?;
            stored.insert(field.name.clone(), value.into());
        }

        let key = stored
            .get(&table.model.primary_key)
            .filter(|key| !key.is_null())
            .cloned()
            .ok_or_else(|| MemoryError::MissingPrimaryKey {
                entity: entity.to_string(),
            })?;
        if table.by_key.contains_key(&key) {
            return Err(MemoryError::DuplicateKey {
                entity: entity.to_string(),
                key,
            });
        }

        table.by_key.insert(key, table.entries.len());
        table.entries.push(Entry {
            values: stored,
            display,
        });

        Ok(())
    }

    /// Model for `entity`, if registered.
    #[must_use]
    pub fn model(&self, entity: &str) -> Option<&EntityModel> {
        self.tables.get(entity).map(|table| &table.model)
    }

    /// Number of entries stored for `entity`.
    #[must_use]
    pub fn len(&self, entity: &str) -> usize {
        self.tables.get(entity).map_or(0, |table| table.entries.len())
    }

    /// True when no entity has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(|table| table.entries.is_empty())
    }

    /// Open a source over one entity of a shared store.
    pub fn source(self: &Arc<Self>, entity: &str) -> Result<MemorySource, MemoryError> {
        MemorySource::new(Arc::clone(self), entity)
    }

    pub(crate) fn entry(&self, entity: &str, index: usize) -> Option<&Entry> {
        self.tables.get(entity)?.entries.get(index)
    }

    pub(crate) fn position_of(&self, entity: &str, key: &Value) -> Option<usize> {
        self.tables.get(entity)?.by_key.get(key).copied()
    }
}

use crate::{
    model::{EntityModel, FieldKind},
    path::{Record, Related},
    source::memory::{Entry, MemoryStore},
    value::Value,
};
use std::{cell::OnceCell, collections::BTreeMap, fmt, sync::Arc};

///
/// MemoryRow
///
/// Materialized record handed out by `MemorySource`. Relations resolve on
/// first access and stay cached for the row's lifetime; eager joins fill
/// the same cells up front.
///

pub struct MemoryRow {
    store: Arc<MemoryStore>,
    entity: String,
    index: usize,
    links: BTreeMap<String, OnceCell<Option<Box<Self>>>>,
}

impl MemoryRow {
    pub(crate) fn new(store: Arc<MemoryStore>, entity: &str, index: usize) -> Self {
        let links = store
            .model(entity)
            .map(|model| {
                model
                    .fields
                    .iter()
                    .filter(|field| field.is_relation())
                    .map(|field| (field.name.clone(), OnceCell::new()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            store,
            entity: entity.to_string(),
            index,
            links,
        }
    }

    /// Entity this row belongs to.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Primary key value.
    #[must_use]
    pub fn key(&self) -> Value {
        self.model()
            .and_then(|model| self.stored(&model.primary_key))
            .unwrap_or(Value::Null)
    }

    /// Every stored value, in model field order.
    pub(crate) fn stored_values(&self) -> Vec<Value> {
        let Some(model) = self.model() else {
            return Vec::new();
        };

        model
            .fields
            .iter()
            .map(|field| self.stored(&field.name).unwrap_or(Value::Null))
            .collect()
    }

    /// Resolve every hop of `chain` now, so later access hits the cache.
    pub(crate) fn prefetch(&self, chain: &[String]) {
        let Some((head, rest)) = chain.split_first() else {
            return;
        };

        if let Some(Some(next)) = self.link(head) {
            next.prefetch(rest);
        }
    }

    /// Follow relation `name`. Outer `None`: not a relation of this entity.
    fn link(&self, name: &str) -> Option<Option<&Self>> {
        let model = self.model()?;
        let name = model.canonical_name(name);
        let cell = self.links.get(name)?;

        Some(cell.get_or_init(|| self.load(name)).as_deref())
    }

    fn load(&self, name: &str) -> Option<Box<Self>> {
        let model = self.model()?;
        let field = model.get_field(name)?;
        let FieldKind::Relation { target } = &field.kind else {
            return None;
        };

        // NULL or dangling keys both read as an unset relation
        let key = self.stored(&field.name)?;
        let index = self.store.position_of(target, &key)?;

        Some(Box::new(Self::new(Arc::clone(&self.store), target, index)))
    }

    fn model(&self) -> Option<&EntityModel> {
        self.store.model(&self.entity)
    }

    fn entry(&self) -> Option<&Entry> {
        self.store.entry(&self.entity, self.index)
    }

    fn stored(&self, field: &str) -> Option<Value> {
        self.entry()?.values.get(field).cloned()
    }
}

impl Record for MemoryRow {
    fn attribute(&self, name: &str) -> Option<Value> {
        let model = self.model()?;
        let field = model.get_field(name)?;

        Some(self.stored(&field.name).unwrap_or(Value::Null))
    }

    fn related(&self, name: &str) -> Option<Related<'_>> {
        self.link(name).map(|link| match link {
            Some(row) => Related::Present(row),
            None => Related::Absent,
        })
    }
}

impl fmt::Display for MemoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry().and_then(|entry| entry.display.as_deref()) {
            Some(display) => f.write_str(display),
            None => write!(f, "{} object ({})", self.entity, self.key()),
        }
    }
}

impl fmt::Debug for MemoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRow")
            .field("entity", &self.entity)
            .field("key", &self.key())
            .finish_non_exhaustive()
    }
}

use crate::{
    model::EntityModel,
    path::{ExtractError, FieldPath, extract_value},
    query::{OrderDirection, Query, predicate::eval},
    source::{
        Source,
        memory::{MemoryError, MemoryRow, MemoryStore},
    },
    value::Value,
};
use std::{collections::BTreeSet, sync::Arc};
use tracing::debug;

///
/// MemorySource
///
/// Query executor over one entity of a `MemoryStore`.
/// Post-access phases run in fixed order:
/// join → filter → order → distinct → page.
///

#[derive(Clone, Debug)]
pub struct MemorySource {
    store: Arc<MemoryStore>,
    entity: String,
}

impl MemorySource {
    pub fn new(store: Arc<MemoryStore>, entity: impl Into<String>) -> Result<Self, MemoryError> {
        let entity = entity.into();
        if store.model(&entity).is_none() {
            return Err(MemoryError::UnknownEntity { entity });
        }

        Ok(Self { store, entity })
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    fn validate(&self, query: &Query) -> Result<(), MemoryError> {
        for chain in query.related() {
            let path = FieldPath::from_relation(chain)?;
            self.walk_relations(path.segments())?;
        }

        for field in query.referenced_fields() {
            let path = FieldPath::from_relation(field)?;
            let holder = self.walk_relations(path.relations())?;
            if holder.get_field(path.leaf()).is_none() {
                return Err(MemoryError::UnknownField {
                    entity: holder.name.clone(),
                    field: path.leaf().to_string(),
                });
            }
        }

        Ok(())
    }

    // Follow relation segments from this source's entity; returns the model
    // reached at the end.
    fn walk_relations(&self, segments: &[String]) -> Result<&EntityModel, MemoryError> {
        let mut model = self.model()?;

        for segment in segments {
            let field = model
                .get_field(segment)
                .ok_or_else(|| MemoryError::UnknownField {
                    entity: model.name.clone(),
                    field: segment.clone(),
                })?;
            let target = field.target().ok_or_else(|| MemoryError::NotARelation {
                entity: model.name.clone(),
                field: segment.clone(),
            })?;
            model = self
                .store
                .model(target)
                .ok_or_else(|| MemoryError::UnknownEntity {
                    entity: target.to_string(),
                })?;
        }

        Ok(model)
    }

    fn model(&self) -> Result<&EntityModel, MemoryError> {
        self.store
            .model(&self.entity)
            .ok_or_else(|| MemoryError::UnknownEntity {
                entity: self.entity.clone(),
            })
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    // Every phase except paging.
    fn execute(&self, query: &Query) -> Result<Vec<MemoryRow>, MemoryError> {
        self.validate(query)?;

        let scanned = self.store.len(&self.entity);
        let mut rows: Vec<MemoryRow> = (0..scanned)
            .map(|index| MemoryRow::new(Arc::clone(&self.store), &self.entity, index))
            .collect();

        // join
        let chains = query
            .related()
            .iter()
            .map(|chain| FieldPath::from_relation(chain))
            .collect::<Result<Vec<_>, _>>()?;
        for row in &rows {
            for chain in &chains {
                row.prefetch(chain.segments());
            }
        }

        // filter
        if let Some(predicate) = query.predicate() {
            rows.retain(|row| eval(row, predicate));
        }

        // order
        if let Some(order) = query.order() {
            let keys = order
                .fields
                .iter()
                .map(|(field, direction)| -> Result<_, MemoryError> {
                    Ok((FieldPath::from_relation(field)?, *direction))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let mut keyed: Vec<(Vec<Value>, MemoryRow)> = rows
                .into_iter()
                .map(|row| {
                    let key = keys.iter().map(|(path, _)| read_or_null(path, &row)).collect();
                    (key, row)
                })
                .collect();

            // stable: ties keep insertion order
            keyed.sort_by(|(left, _), (right, _)| {
                keys.iter()
                    .zip(left.iter().zip(right))
                    .map(|((_, direction), (l, r))| match direction {
                        OrderDirection::Asc => l.cmp(r),
                        OrderDirection::Desc => r.cmp(l),
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            rows = keyed.into_iter().map(|(_, row)| row).collect();
        }

        // distinct
        if query.is_distinct() {
            let only = query
                .only_fields()
                .map(|fields| {
                    fields
                        .iter()
                        .map(|field| FieldPath::from_relation(field))
                        .collect::<Result<Vec<_>, _>>()
                })
                .transpose()?;

            let mut seen: BTreeSet<Vec<Value>> = BTreeSet::new();
            rows.retain(|row| {
                let key = match &only {
                    Some(paths) => paths.iter().map(|path| read_or_null(path, row)).collect(),
                    None => row.stored_values(),
                };
                seen.insert(key)
            });
        }

        debug!(
            entity = %self.entity,
            query = %query,
            scanned,
            matched = rows.len(),
            "memory source executed query"
        );

        Ok(rows)
    }
}

// Unset relations read as NULL, as an outer join would.
fn read_or_null(path: &FieldPath, row: &MemoryRow) -> Value {
    match extract_value(path, row) {
        Ok(value) => value,
        Err(ExtractError::Missing(_) | ExtractError::UnknownAttribute { .. }) => Value::Null,
    }
}

impl Source for MemorySource {
    type Record = MemoryRow;
    type Error = MemoryError;

    fn fetch(&self, query: &Query) -> Result<Vec<MemoryRow>, MemoryError> {
        let rows = self.execute(query)?;

        let Some(page) = query.page_spec() else {
            return Ok(rows);
        };
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = page
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    fn count(&self, query: &Query) -> Result<u64, MemoryError> {
        let rows = self.execute(query)?;

        Ok(u64::try_from(rows.len()).unwrap_or(u64::MAX))
    }
}

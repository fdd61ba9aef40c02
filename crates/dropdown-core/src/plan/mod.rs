//! Projection planning.
//!
//! Decides which relation chains to join eagerly and which fields to fetch
//! for one option-building call. The two sets dedupe differently: joins by
//! relation prefix, field restriction by full path.


use crate::path::{FieldPath, RelationChain};

///
/// ProjectionPlan
///
/// Derived per call and discarded afterwards.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProjectionPlan {
    joins: Vec<RelationChain>,
    fields: Option<Vec<String>>,
}

impl ProjectionPlan {
    /// Plan joins and field restriction for the given label, value and
    /// context paths. Without a label path no restriction is planned, since
    /// the label then comes from the record's default textual form.
    #[must_use]
    pub fn new(label: Option<&FieldPath>, value: &FieldPath, context: &[FieldPath]) -> Self {
        let paths: Vec<&FieldPath> = label
            .into_iter()
            .chain(std::iter::once(value))
            .chain(context)
            .collect();

        let mut joins: Vec<RelationChain> = Vec::new();
        for chain in paths.iter().filter_map(|path| path.relation_chain()) {
            if !joins.contains(&chain) {
                joins.push(chain);
            }
        }

        let fields = label.map(|_| {
            let mut fields: Vec<String> = Vec::with_capacity(paths.len());
            for field in paths.iter().map(|path| path.to_relation_string()) {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
            fields
        });

        Self { joins, fields }
    }

    /// Relation chains to join eagerly, first-seen order.
    #[must_use]
    pub fn joins(&self) -> &[RelationChain] {
        &self.joins
    }

    /// Field paths (relation form) to restrict fetching to, if any.
    #[must_use]
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Joins rendered in relation-traversal form.
    #[must_use]
    pub fn join_strings(&self) -> Vec<String> {
        self.joins
            .iter()
            .map(RelationChain::to_relation_string)
            .collect()
    }
}

/// Plan a projection; see [`ProjectionPlan::new`].
#[must_use]
pub fn plan(label: Option<&FieldPath>, value: &FieldPath, context: &[FieldPath]) -> ProjectionPlan {
    ProjectionPlan::new(label, value, context)
}

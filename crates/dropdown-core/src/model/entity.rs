use crate::model::{FieldKind, FieldModel, PK_ALIAS};

///
/// EntityModel
/// Minimal runtime model for one entity.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityModel {
    /// Stable external name used for lookup and relation targets.
    pub name: String,
    /// Primary key field name (always present in `fields`).
    pub primary_key: String,
    /// Ordered field list, primary key first.
    pub fields: Vec<FieldModel>,
}

impl EntityModel {
    /// Create a model with only its primary key field.
    #[must_use]
    pub fn new(name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        let primary_key = primary_key.into();

        Self {
            name: name.into(),
            fields: vec![FieldModel {
                name: primary_key.clone(),
                kind: FieldKind::Scalar,
            }],
            primary_key,
        }
    }

    /// Append a scalar field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldModel {
            name: name.into(),
            kind: FieldKind::Scalar,
        });
        self
    }

    /// Append a relation to another entity.
    #[must_use]
    pub fn relation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.fields.push(FieldModel {
            name: name.into(),
            kind: FieldKind::Relation {
                target: target.into(),
            },
        });
        self
    }

    /// Look up a field, resolving the `pk` alias.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldModel> {
        let name = self.canonical_name(name);

        self.fields.iter().find(|field| field.name == name)
    }

    /// Map the `pk` alias onto the primary key; other names pass through.
    #[must_use]
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        if name == PK_ALIAS {
            &self.primary_key
        } else {
            name
        }
    }

    /// Target entity of relation field `name`, if it is one.
    #[must_use]
    pub fn relation_target(&self, name: &str) -> Option<&str> {
        self.get_field(name).and_then(FieldModel::target)
    }
}

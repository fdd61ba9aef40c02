use crate::{
    path::{FieldPath, PathError},
    query::predicate::{CompareOp, Predicate},
    value::Value,
};

///
/// FieldRef
///
/// Fluent predicate builder for one field. Accepts a dotted path
/// (`department.name`) and emits predicates in relation-traversal form.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldRef {
    field: String,
}

impl FieldRef {
    /// Reference a field by dotted path.
    ///
    /// A path `FieldPath::resolve` rejects is kept verbatim, so the source
    /// reports it by its original text; use `try_new` to fail up front.
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = path.as_ref();

        Self::try_new(path).unwrap_or_else(|_| Self {
            field: path.to_string(),
        })
    }

    /// Reference a field, applying the same path rules as option paths.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, PathError> {
        let path = FieldPath::resolve(path.as_ref())?;

        Ok(Self {
            field: path.to_relation_string(),
        })
    }

    /// Field name in relation-traversal form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.field
    }

    fn compare(&self, op: CompareOp, value: impl Into<Value>) -> Predicate {
        Predicate::compare(self.field.clone(), op, value.into())
    }

    #[must_use]
    pub fn eq(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Lte, value)
    }

    #[must_use]
    pub fn gt(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn contains(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Contains, value)
    }

    #[must_use]
    pub fn contains_ci(&self, value: impl Into<Value>) -> Predicate {
        Predicate::TextContainsCi {
            field: self.field.clone(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn starts_with(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::StartsWith, value)
    }

    #[must_use]
    pub fn ends_with(&self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::EndsWith, value)
    }

    #[must_use]
    pub fn in_list<I>(&self, values: I) -> Predicate
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Predicate::in_(
            self.field.clone(),
            values.into_iter().map(Into::into).collect(),
        )
    }

    #[must_use]
    pub fn not_in<I>(&self, values: I) -> Predicate
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Predicate::not(self.in_list(values))
    }

    #[must_use]
    pub fn is_null(&self) -> Predicate {
        Predicate::is_null(self.field.clone())
    }

    #[must_use]
    pub fn is_not_null(&self) -> Predicate {
        Predicate::not(self.is_null())
    }
}

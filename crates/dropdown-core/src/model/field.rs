///
/// FieldModel
/// Runtime field metadata used by query validation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Field name as used in paths and predicates.
    pub name: String,
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Relation { .. })
    }

    /// Target entity name when this field is a relation.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Relation { target } => Some(target.as_str()),
            FieldKind::Scalar => None,
        }
    }
}

///
/// FieldKind
///
/// Relations store the target's primary key value; `Null` means unset.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Scalar,
    Relation { target: String },
}

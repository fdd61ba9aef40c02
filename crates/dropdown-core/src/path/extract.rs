use crate::{path::FieldPath, value::Value};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Related
///
/// Result of following one relation hop on a record.
///

#[derive(Clone, Copy)]
pub enum Related<'a> {
    /// The relation exists on the record but is unset.
    Absent,
    /// The relation points at a loaded record.
    Present(&'a dyn Record),
}

impl fmt::Debug for Related<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Present(record) => write!(f, "Present({record})"),
        }
    }
}

///
/// Record
///
/// Attribute-access capability a source record exposes to path extraction.
/// `Display` is the record's default textual representation, used as the
/// option label when no label path is given.
///

pub trait Record: fmt::Display {
    /// Read a scalar attribute. `None` when the record has no such attribute.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Follow a relation. `None` when the record has no such relation.
    fn related(&self, name: &str) -> Option<Related<'_>>;
}

///
/// MissingFieldError
///
/// An intermediate relation on the way to a leaf is unset.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("relation '{segment}' is unset while resolving '{path}'")]
pub struct MissingFieldError {
    pub path: String,
    pub segment: String,
}

///
/// ExtractError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ExtractError {
    #[error("{0}")]
    Missing(#[from] MissingFieldError),

    #[error("record has no attribute '{segment}' while resolving '{path}'")]
    UnknownAttribute { path: String, segment: String },
}

/// Walk `path` across `record`'s relations and read the leaf attribute.
pub fn extract_value(path: &FieldPath, record: &dyn Record) -> Result<Value, ExtractError> {
    let mut current = record;

    for segment in path.relations() {
        match current.related(segment) {
            Some(Related::Present(next)) => current = next,
            Some(Related::Absent) => {
                return Err(MissingFieldError {
                    path: path.to_string(),
                    segment: segment.clone(),
                }
                .into());
            }
            None => {
                return Err(ExtractError::UnknownAttribute {
                    path: path.to_string(),
                    segment: segment.clone(),
                });
            }
        }
    }

    current
        .attribute(path.leaf())
        .ok_or_else(|| ExtractError::UnknownAttribute {
            path: path.to_string(),
            segment: path.leaf().to_string(),
        })
}

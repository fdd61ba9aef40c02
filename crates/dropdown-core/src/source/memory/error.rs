use crate::{path::PathError, value::Value};
use thiserror::Error as ThisError;

///
/// MemoryError
/// Errors raised by the memory store and the queries it executes.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MemoryError {
    #[error("unknown entity '{entity}'")]
    UnknownEntity { entity: String },

    #[error("entity '{entity}' is already registered")]
    DuplicateEntity { entity: String },

    #[error("entity '{entity}' has no field '{field}'")]
    UnknownField { entity: String, field: String },

    #[error("field '{field}' on entity '{entity}' is not a relation")]
    NotARelation { entity: String, field: String },

    #[error("entry for entity '{entity}' has no primary key value")]
    MissingPrimaryKey { entity: String },

    #[error("entity '{entity}' already has an entry with key {key}")]
    DuplicateKey { entity: String, key: Value },

    #[error("{0}")]
    InvalidPath(#[from] PathError),
}

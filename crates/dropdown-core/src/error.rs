use crate::path::{ExtractError, MissingFieldError, PathError};
use thiserror::Error as ThisError;

///
/// OptionError
///
/// Failure raised while building options from a source.
/// Source errors are carried as-is so callers can match on their own type.
///

#[derive(Debug, ThisError)]
pub enum OptionError<E> {
    #[error("{0}")]
    InvalidPath(#[from] PathError),

    #[error("{0}")]
    MissingField(#[from] MissingFieldError),

    #[error("record has no attribute '{segment}' while resolving '{path}'")]
    UnknownAttribute { path: String, segment: String },

    #[error(transparent)]
    Source(E),
}

impl<E> OptionError<E> {
    /// Return true when the failure came from the source collaborator.
    #[must_use]
    pub const fn is_source(&self) -> bool {
        matches!(self, Self::Source(_))
    }

    /// Borrow the source error, if this failure came from the source.
    #[must_use]
    pub const fn as_source(&self) -> Option<&E> {
        match self {
            Self::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl<E> From<ExtractError> for OptionError<E> {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Missing(missing) => Self::MissingField(missing),
            ExtractError::UnknownAttribute { path, segment } => {
                Self::UnknownAttribute { path, segment }
            }
        }
    }
}

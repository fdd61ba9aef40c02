//! Source collaborator boundary.
//!
//! A `Source` materializes a declarative `Query` into records. The option
//! builder only ever talks to this trait; the memory source is the
//! reference implementation.

mod memory;

pub use memory::{MemoryError, MemoryRow, MemorySource, MemoryStore};

use crate::{path::Record, query::Query};

///
/// Source
///
/// Queryable record collection.
///
/// Implementations must treat `select_related` and `only` as hints that never
/// change which records pass the filter or how they are ordered, and must
/// return identical results for identical queries over unchanged data.
///

pub trait Source {
    type Record: Record;
    type Error: std::error::Error + 'static;

    /// Materialize the query, paging included.
    fn fetch(&self, query: &Query) -> Result<Vec<Self::Record>, Self::Error>;

    /// Count records matching the query, ignoring paging.
    fn count(&self, query: &Query) -> Result<u64, Self::Error>;
}

impl<S: Source + ?Sized> Source for &S {
    type Record = S::Record;
    type Error = S::Error;

    fn fetch(&self, query: &Query) -> Result<Vec<Self::Record>, Self::Error> {
        (**self).fetch(query)
    }

    fn count(&self, query: &Query) -> Result<u64, Self::Error> {
        (**self).count(query)
    }
}

//! Dotted field paths and their traversal over records.
//!
//! A path such as `department.manager.name` names a leaf attribute
//! (`name`) reached through a chain of relation hops
//! (`department`, `manager`). Sources receive paths in relation-traversal
//! form, with hops joined by `__` (`department__manager__name`).

mod extract;


use std::fmt;
use thiserror::Error as ThisError;

pub use extract::{ExtractError, MissingFieldError, Record, Related, extract_value};

///
/// CONSTANTS
///

/// Separator between segments in caller-facing dotted paths.
pub const PATH_SEPARATOR: char = '.';

/// Separator between segments in relation-traversal form.
pub const RELATION_SEPARATOR: &str = "__";

///
/// PathError
///
/// An empty or malformed field-path string.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,

    #[error("field path '{path}' has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },

    #[error("field path '{path}' has segment '{segment}' containing reserved separator '__'")]
    ReservedSeparator { path: String, segment: String },

    #[error("field path '{path}' has segment '{segment}' with an underscore next to a separator")]
    UnderscoreAtSeparator { path: String, segment: String },
}

///
/// FieldPath
///
/// Parsed field path: zero or more relation segments followed by one leaf.
/// Invariant: `segments` is non-empty, no segment is empty, and the
/// relation form parses back to the same segments.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path such as `department.name`.
    ///
    /// Segments may not contain `__`, and an underscore may not touch a
    /// separator (`dept_.name`, `dept._name`), so the relation form stays
    /// unambiguous.
    pub fn resolve(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let last = path.matches(PATH_SEPARATOR).count();
        let segments = path
            .split(PATH_SEPARATOR)
            .enumerate()
            .map(|(index, segment)| {
                if segment.is_empty() {
                    return Err(PathError::EmptySegment {
                        path: path.to_string(),
                        index,
                    });
                }
                if segment.contains(RELATION_SEPARATOR) {
                    return Err(PathError::ReservedSeparator {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    });
                }
                // `a_.b` and `a._b` would both render as `a___b`
                if (index > 0 && segment.starts_with('_'))
                    || (index < last && segment.ends_with('_'))
                {
                    return Err(PathError::UnderscoreAtSeparator {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    });
                }

                Ok(segment.to_string())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Parse a path in relation-traversal form such as `department__name`.
    pub fn from_relation(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let segments = path
            .split(RELATION_SEPARATOR)
            .enumerate()
            .map(|(index, segment)| {
                if segment.is_empty() {
                    Err(PathError::EmptySegment {
                        path: path.to_string(),
                        index,
                    })
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Relation hops needed to reach the record holding the leaf.
    #[must_use]
    pub fn relations(&self) -> &[String] {
        // segments is never empty
        &self.segments[..self.segments.len() - 1]
    }

    /// Final segment naming the scalar to extract.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when the path needs no relation traversal.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.segments.len() == 1
    }

    /// Relation prefix of this path, if it has one.
    #[must_use]
    pub fn relation_chain(&self) -> Option<RelationChain> {
        if self.is_bare() {
            None
        } else {
            Some(RelationChain {
                segments: self.relations().to_vec(),
            })
        }
    }

    /// Render in relation-traversal form (`a__b__c`).
    #[must_use]
    pub fn to_relation_string(&self) -> String {
        self.segments.join(RELATION_SEPARATOR)
    }

    /// Extract this path's value from a record.
    pub fn extract(&self, record: &dyn Record) -> Result<crate::value::Value, ExtractError> {
        extract_value(self, record)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }

        Ok(())
    }
}

///
/// RelationChain
///
/// Non-empty sequence of relation hops; the unit of eager joining.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RelationChain {
    segments: Vec<String>,
}

impl RelationChain {
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Render in relation-traversal form (`a__b`).
    #[must_use]
    pub fn to_relation_string(&self) -> String {
        self.segments.join(RELATION_SEPARATOR)
    }
}

/// Parse a dotted field path.
pub fn resolve(path: &str) -> Result<FieldPath, PathError> {
    FieldPath::resolve(path)
}

//! Runtime data model definitions.
//!
//! Types in `model` describe the entities a source can answer queries for:
//! their primary key, scalar fields and relations to other entities.
//! Sources use them to validate query paths before executing anything.

mod entity;
mod field;

#[cfg(test)]
mod tests;

pub use entity::EntityModel;
pub use field::{FieldKind, FieldModel};

/// Attribute name that always aliases an entity's primary key.
pub const PK_ALIAS: &str = "pk";

//! Core runtime for Dropdown: values, field paths, projection planning,
//! query descriptions, sources, and the option builders exported via the
//! `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod model;
pub mod option;
pub mod path;
pub mod plan;
pub mod query;
pub mod source;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Value path used when the caller does not name one.
pub const DEFAULT_VALUE_PATH: &str = "pk";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        option::{ChoiceEnum, OptionItem, Options},
        path::{FieldPath, Record, Related},
        query::{FieldRef, Predicate, Query},
        source::Source,
        value::Value,
    };
}

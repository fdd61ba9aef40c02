//! Option lists for selection widgets.
//!
//! ## Crate layout
//! - `core`: values, field paths, projection planning, queries, sources,
//!   configuration, and the option builders.
//!
//! Most callers need only [`from_source`] and [`from_choices`] together
//! with the `prelude`.

pub use dropdown_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{
    DEFAULT_VALUE_PATH,
    config::{DropdownConfig, MissingRelation},
    error::OptionError,
    option::{OptionBuilder, from_choices, from_enum, from_source},
};

///
/// Prelude
/// domain vocabulary plus the builder entry points
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::{DropdownConfig, OptionBuilder, from_choices, from_enum, from_source};
}

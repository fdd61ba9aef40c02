//! Option items and the builders that produce them.
//!
//! `builder` projects records from a `Source`; `choices` converts a static
//! enumeration. Both yield `OptionItem`s.

mod builder;
mod choices;


use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use serde::{Serialize, Serializer, ser::SerializeMap};

pub use builder::{OptionBuilder, from_source};
pub use choices::{ChoiceEnum, from_choices, from_enum};

///
/// Context
///
/// Extra values carried by an option, keyed by the field path as the caller
/// spelled it. Keeps request order and serializes as a JSON object in that
/// order.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct Context(Vec<(String, Value)>);

impl Context {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Value stored under `path`, if requested.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.0
            .iter()
            .find_map(|(key, value)| (key == path).then_some(value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, value: Value) {
        self.0.push((path.into(), value));
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

///
/// OptionItem
///
/// One selectable entry: display label, submitted value, and context.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OptionItem {
    label: String,
    value: Value,
    context: Context,
}

impl OptionItem {
    /// Item with an empty context.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            context: Context::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }
}

///
/// Options
///
/// Items built from a source plus the number of records that matched
/// before the item limit was applied.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Options {
    pub items: Vec<OptionItem>,
    pub total: u64,
}

impl Options {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the limit cut off matching records.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        u64::try_from(self.items.len()).map_or(true, |len| len < self.total)
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<OptionItem>, u64) {
        (self.items, self.total)
    }
}

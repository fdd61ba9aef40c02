//! JSON-facing encoding for `Value`.
//!
//! Values serialize as their natural scalar form so UI consumers can use
//! option values directly; ULIDs encode as their canonical string.

use crate::value::Value;
use serde::{Serialize, Serializer};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Uint(n) => serializer.serialize_u64(*n),
            Self::Float(f) => serializer.serialize_f64(f.get()),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Ulid(u) => serializer.collect_str(u),
        }
    }
}

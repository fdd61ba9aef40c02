mod compare;
mod wire;

#[cfg(test)]
mod tests;

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};
use ulid::Ulid;

// re-exports
pub use compare::{canonical_cmp, strict_order_cmp};

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextMode {
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// Float64
///
/// Finite-or-not f64 wrapper with a total order, so values can be sorted,
/// deduplicated and used as map keys.
///

#[derive(Clone, Copy, Debug)]
pub struct Float64(f64);

impl Float64 {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    // -0.0 and 0.0 compare equal; every NaN collapses to one bit pattern.
    fn canonical_bits(self) -> u64 {
        if self.0 == 0.0 {
            0
        } else if self.0.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for Float64 {}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }

        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// Value
///
/// Scalar read from a record attribute, used for option values, context
/// entries, predicate operands and ordering keys.
///
/// Null → the attribute is unset (SQL NULL).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(Float64),
    Text(String),
    Ulid(Ulid),
}

impl Value {
    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Uint(_) | Self::Float(_))
    }

    /// Borrow the inner text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    /// Canonical variant rank; lower ranks sort first.
    #[must_use]
    pub(crate) const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Uint(_) => 3,
            Self::Float(_) => 4,
            Self::Text(_) => 5,
            Self::Ulid(_) => 6,
        }
    }

    /// Lossy f64 view used for cross-variant numeric comparison.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub(crate) const fn to_f64_lossy(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Uint(n) => Some(*n as f64),
            Self::Float(f) => Some(f.get()),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Substring test; `None` when either side is not text.
    #[must_use]
    pub fn text_contains(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        let (Self::Text(haystack), Self::Text(needle)) = (self, needle) else {
            return None;
        };

        Some(match mode {
            TextMode::Cs => haystack.contains(needle.as_str()),
            TextMode::Ci => haystack.to_lowercase().contains(&needle.to_lowercase()),
        })
    }

    /// Prefix test; `None` when either side is not text.
    #[must_use]
    pub fn text_starts_with(&self, prefix: &Self) -> Option<bool> {
        match (self, prefix) {
            (Self::Text(a), Self::Text(b)) => Some(a.starts_with(b.as_str())),
            _ => None,
        }
    }

    /// Suffix test; `None` when either side is not text.
    #[must_use]
    pub fn text_ends_with(&self, suffix: &Self) -> Option<bool> {
        match (self, suffix) {
            (Self::Text(a), Self::Text(b)) => Some(a.ends_with(b.as_str())),
            _ => None,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(self, other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Ulid(u) => write!(f, "{u}"),
        }
    }
}

///
/// CONVERSIONS
///

macro_rules! impl_from_value {
    ( $( $ty:ty => $variant:ident ( $conv:expr ) ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant($conv(v))
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool(std::convert::identity),
    i8 => Int(i64::from),
    i16 => Int(i64::from),
    i32 => Int(i64::from),
    i64 => Int(std::convert::identity),
    u8 => Uint(u64::from),
    u16 => Uint(u64::from),
    u32 => Uint(u64::from),
    u64 => Uint(std::convert::identity),
    f64 => Float(Float64::new),
    String => Text(std::convert::identity),
    &str => Text(str::to_string),
    Ulid => Ulid(std::convert::identity),
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(Float64::new(f64::from(v)))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

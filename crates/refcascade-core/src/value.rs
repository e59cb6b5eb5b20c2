use crate::model::EntityId;
use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

///
/// Float64
///
/// Finite f64 only; -0.0 canonically stored as 0.0
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Display, Serialize)]
pub struct Float64(f64);

impl Float64 {
    /// Fallible constructor that rejects non-finite values and normalizes -0.0.
    #[must_use]
    pub fn try_new(v: f64) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }

        Some(Self(if v == 0.0 { 0.0 } else { v }))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Eq for Float64 {}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.to_bits());
    }
}

impl<'de> Deserialize<'de> for Float64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = f64::deserialize(deserializer)?;

        Self::try_new(v).ok_or_else(|| de::Error::custom(format!("non-finite float: {v}")))
    }
}

///
/// Value
///
/// One field item. Deserializes untagged from host form state:
/// booleans, integers, decimals and strings map to scalars, and
/// `{"target_id": ..}` maps to an entity reference.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Uint(u64),
    Int(i64),
    Float(Float64),
    Text(String),
    Ref { target_id: EntityId },
}

impl Value {
    #[must_use]
    pub fn reference(target_id: impl Into<EntityId>) -> Self {
        Self::Ref {
            target_id: target_id.into(),
        }
    }

    /// Decimal item; `None` for NaN and infinities.
    #[must_use]
    pub fn float(v: f64) -> Option<Self> {
        Float64::try_new(v).map(Self::Float)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Ref { target_id } => write!(f, "ref:{target_id}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

///
/// FieldValue
///
/// Configured replacement for one field: a single item, or an ordered
/// sequence matching a multi-valued field.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Many(Vec<Value>),
    Single(Value),
}

impl FieldValue {
    /// Items in configured order.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        match self {
            Self::Many(items) => items,
            Self::Single(item) => std::slice::from_ref(item),
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::Many(items) => items,
            Self::Single(item) => vec![item],
        }
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        Self::Single(v)
    }
}

impl From<Vec<Value>> for FieldValue {
    fn from(v: Vec<Value>) -> Self {
        Self::Many(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Single(Value::from(v))
    }
}

///
/// TESTS
///

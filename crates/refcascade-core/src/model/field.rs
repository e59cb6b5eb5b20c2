use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, num::NonZeroU32};

///
/// Cardinality
///
/// Maximum number of items a field may hold.
/// Hosts encode unlimited as `-1`; that is also the serialized form here.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Cardinality {
    Limited(NonZeroU32),
    Unlimited,
}

impl Cardinality {
    /// Host sentinel for unlimited cardinality.
    pub const UNLIMITED_SENTINEL: i64 = -1;

    pub const SINGLE: Self = Self::Limited(NonZeroU32::MIN);

    /// Build a limited cardinality; `0` is not a valid bound.
    #[must_use]
    pub const fn limited(bound: u32) -> Option<Self> {
        match NonZeroU32::new(bound) {
            Some(bound) => Some(Self::Limited(bound)),
            None => None,
        }
    }

    /// Decode the host's signed representation.
    #[must_use]
    pub fn from_host(raw: i64) -> Option<Self> {
        if raw == Self::UNLIMITED_SENTINEL {
            return Some(Self::Unlimited);
        }

        u32::try_from(raw).ok().and_then(Self::limited)
    }

    #[must_use]
    pub fn to_host(self) -> i64 {
        match self {
            Self::Limited(bound) => i64::from(bound.get()),
            Self::Unlimited => Self::UNLIMITED_SENTINEL,
        }
    }

    /// True when the field may hold more than one item.
    #[must_use]
    pub const fn is_multiple(self) -> bool {
        match self {
            Self::Limited(bound) => bound.get() > 1,
            Self::Unlimited => true,
        }
    }

    /// True when `len` items already fill the field.
    #[must_use]
    pub fn is_full(self, len: usize) -> bool {
        match self {
            Self::Limited(bound) => usize::try_from(bound.get()).is_ok_and(|bound| len >= bound),
            Self::Unlimited => false,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(bound) => write!(f, "{bound}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

impl Serialize for Cardinality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_host())
    }
}

impl<'de> Deserialize<'de> for Cardinality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;

        Self::from_host(raw).ok_or_else(|| {
            de::Error::invalid_value(
                de::Unexpected::Signed(raw),
                &"a positive bound or -1 for unlimited",
            )
        })
    }
}

///
/// FieldDefinition
/// Field metadata for one bundle, as reported by the metadata service.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldDefinition {
    /// Field machine name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    pub cardinality: Cardinality,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            cardinality,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_sentinel_round_trips_unlimited() {
        assert_eq!(Cardinality::from_host(-1), Some(Cardinality::Unlimited));
        assert_eq!(Cardinality::Unlimited.to_host(), -1);
        assert_eq!(Cardinality::from_host(0), None);
        assert_eq!(Cardinality::from_host(-3), None);
    }

    #[test]
    fn single_is_not_multiple() {
        assert!(!Cardinality::SINGLE.is_multiple());
        assert!(Cardinality::limited(2).unwrap().is_multiple());
        assert!(Cardinality::Unlimited.is_multiple());
    }

    #[test]
    fn fullness_respects_bound() {
        let two = Cardinality::limited(2).unwrap();

        assert!(!two.is_full(1));
        assert!(two.is_full(2));
        assert!(two.is_full(3));
        assert!(!Cardinality::Unlimited.is_full(usize::MAX));
    }

    #[test]
    fn definition_deserializes_host_cardinality() {
        let def: FieldDefinition =
            serde_json::from_str(r#"{"name":"field_tags","label":"Tags","cardinality":-1}"#)
                .unwrap();

        assert_eq!(def.cardinality, Cardinality::Unlimited);
        assert!(
            serde_json::from_str::<FieldDefinition>(
                r#"{"name":"x","label":"X","cardinality":0}"#
            )
            .is_err()
        );
    }
}

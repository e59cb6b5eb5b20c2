use crate::{
    config::ConfigError,
    model::{BundleRef, bundle_key},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

///
/// WhitelistFlag
///
/// Value of one whitelist checkbox. Hosts store the option key for a
/// checked box and the zero sentinel (`0` or `"0"`) for an unchecked one.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WhitelistFlag {
    Unchecked,
    /// Checked, with the stored option value when the host kept one.
    Checked(Option<String>),
}

impl WhitelistFlag {
    #[must_use]
    pub fn checked(field: impl Into<String>) -> Self {
        Self::Checked(Some(field.into()))
    }

    #[must_use]
    pub const fn is_checked(&self) -> bool {
        matches!(self, Self::Checked(_))
    }

    // Loose host typing: anything but the zero sentinel, false or null counts.
    fn from_text(value: &str) -> Self {
        match value {
            "0" | "" => Self::Unchecked,
            other => Self::Checked(Some(other.to_string())),
        }
    }
}

impl Serialize for WhitelistFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unchecked => serializer.serialize_u8(0),
            Self::Checked(Some(value)) => serializer.serialize_str(value),
            Self::Checked(None) => serializer.serialize_u8(1),
        }
    }
}

impl<'de> Deserialize<'de> for WhitelistFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl de::Visitor<'_> for FlagVisitor {
            type Value = WhitelistFlag;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a checkbox value (option key, 0, or boolean)")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(if v {
                    WhitelistFlag::Checked(None)
                } else {
                    WhitelistFlag::Unchecked
                })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(if v == 0 {
                    WhitelistFlag::Unchecked
                } else {
                    WhitelistFlag::Checked(None)
                })
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(if v == 0 {
                    WhitelistFlag::Unchecked
                } else {
                    WhitelistFlag::Checked(None)
                })
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Err(E::custom(ConfigError::InvalidWhitelistFlag {
                    found: v.to_string(),
                }))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(WhitelistFlag::from_text(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(WhitelistFlag::Unchecked)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(WhitelistFlag::Unchecked)
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

///
/// PreconfigEntry
///
/// Whitelist checkbox group for one (entity type, bundle).
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PreconfigEntry {
    #[serde(default)]
    pub whitelist: BTreeMap<String, WhitelistFlag>,
}

impl PreconfigEntry {
    /// Fields whose flag survives the zero-sentinel filter.
    ///
    /// A field counts when its own key is checked, or when a checked flag
    /// stores the field name as its option value.
    #[must_use]
    pub fn whitelisted_fields(&self) -> BTreeSet<String> {
        let mut fields = BTreeSet::new();

        for (field, flag) in &self.whitelist {
            if let WhitelistFlag::Checked(value) = flag {
                fields.insert(field.clone());
                if let Some(value) = value {
                    fields.insert(value.clone());
                }
            }
        }

        fields
    }
}

///
/// Preconfiguration
///
/// Whitelist entries keyed by `"<entity_type>_<bundle>"`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Preconfiguration {
    entries: BTreeMap<String, PreconfigEntry>,
}

impl Preconfiguration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse preconfiguration from host form state.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "preconfiguration",
            source,
        })
    }

    /// Builder-style whitelist entry; every listed field is checked.
    #[must_use]
    pub fn with_whitelist<I, S>(mut self, bundle: &BundleRef, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.entries.entry(bundle.key()).or_default();
        for field in fields {
            let field = field.into();
            entry
                .whitelist
                .insert(field.clone(), WhitelistFlag::checked(field));
        }
        self
    }

    /// Builder-style unchecked box.
    #[must_use]
    pub fn with_unchecked(mut self, bundle: &BundleRef, field: impl Into<String>) -> Self {
        self.entries
            .entry(bundle.key())
            .or_default()
            .whitelist
            .insert(field.into(), WhitelistFlag::Unchecked);
        self
    }

    #[must_use]
    pub fn entry(&self, entity_type: &str, bundle: &str) -> Option<&PreconfigEntry> {
        self.entries.get(&bundle_key(entity_type, bundle))
    }

    #[must_use]
    pub fn entry_by_key(&self, key: &str) -> Option<&PreconfigEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PreconfigEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whitelisted fields for one bundle; an absent entry is empty.
    #[must_use]
    pub fn whitelisted_fields(&self, bundle: &BundleRef) -> BTreeSet<String> {
        self.entry(&bundle.entity_type, &bundle.bundle)
            .map(PreconfigEntry::whitelisted_fields)
            .unwrap_or_default()
    }
}

///
/// TESTS
///

use crate::value::Value;
use derive_more::{Deref, Display};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{collections::BTreeMap, fmt};

///
/// EntityId
///
/// Opaque entity identifier. Hosts hand out integer and string ids
/// interchangeably, so both normalise to the same textual form.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntityIdVisitor;

        impl de::Visitor<'_> for EntityIdVisitor {
            type Value = EntityId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an entity id as string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(EntityId::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(EntityId::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(EntityId(v.to_string()))
            }
        }

        deserializer.deserialize_any(EntityIdVisitor)
    }
}

///
/// BundleRef
///
/// One (entity type, bundle) pair.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[display("{entity_type}.{bundle}")]
pub struct BundleRef {
    pub entity_type: String,
    pub bundle: String,
}

impl BundleRef {
    #[must_use]
    pub fn new(entity_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            bundle: bundle.into(),
        }
    }

    /// Preconfiguration key, `"<entity_type>_<bundle>"`.
    ///
    /// The key is ambiguous on its own (`taxonomy_term_tags`); callers that
    /// need to split it must match it against known bundles.
    #[must_use]
    pub fn key(&self) -> String {
        bundle_key(&self.entity_type, &self.bundle)
    }
}

/// Build the preconfiguration key for one (entity type, bundle) pair.
#[must_use]
pub fn bundle_key(entity_type: &str, bundle: &str) -> String {
    format!("{entity_type}_{bundle}")
}

///
/// EntityHandle
///
/// Reference to one stored entity, as surfaced by a view relationship.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[display("{entity_type}:{bundle}:{id}")]
pub struct EntityHandle {
    pub entity_type: String,
    pub bundle: String,
    pub id: EntityId,
}

impl EntityHandle {
    #[must_use]
    pub fn new(
        entity_type: impl Into<String>,
        bundle: impl Into<String>,
        id: impl Into<EntityId>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            bundle: bundle.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn bundle_ref(&self) -> BundleRef {
        BundleRef::new(self.entity_type.clone(), self.bundle.clone())
    }
}

///
/// Entity
///
/// Loaded entity: its handle plus every field's ordered item list.
/// A single-valued field still holds a one-item list.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entity {
    pub handle: EntityHandle,
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<Value>>,
}

impl Entity {
    #[must_use]
    pub const fn new(handle: EntityHandle) -> Self {
        Self {
            handle,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, items: Vec<Value>) -> Self {
        self.fields.insert(field.into(), items);
        self
    }

    /// Current items of one field; an absent field reads as empty.
    #[must_use]
    pub fn items(&self, field: &str) -> &[Value] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Replace the items of one field.
    pub fn set_items(&mut self, field: impl Into<String>, items: Vec<Value>) {
        self.fields.insert(field.into(), items);
    }
}

///
/// TESTS
///

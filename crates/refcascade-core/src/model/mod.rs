//! Runtime data model for entities, bundles and field metadata.
//!
//! Everything here is host-agnostic: the host's metadata and storage
//! services hand these shapes across the collaborator traits in
//! [`crate::traits`].
pub mod entity;
pub mod field;
pub mod row;

pub use entity::{BundleRef, Entity, EntityHandle, EntityId, bundle_key};
pub use field::{Cardinality, FieldDefinition};
pub use row::{ResultRow, SelectedRow};

///
/// EntityTypeInfo
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityTypeInfo {
    pub id: String,
    pub label: String,
}

impl EntityTypeInfo {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

///
/// BundleInfo
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BundleInfo {
    pub id: String,
    pub label: String,
}

impl BundleInfo {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

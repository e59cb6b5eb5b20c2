//! Collaborator boundaries supplied by the host.
//!
//! The action never reaches for global services; the host injects one
//! implementation of each trait when it builds the action.

use crate::{
    error::InternalError,
    model::{BundleInfo, Entity, EntityHandle, EntityTypeInfo, FieldDefinition},
};

///
/// EntityMetadata
///
/// Read-only entity type, bundle and field metadata.
///

pub trait EntityMetadata {
    /// Every known entity type, in host order.
    fn entity_types(&self) -> Vec<EntityTypeInfo>;

    /// Bundles of one entity type; unknown types have none.
    fn bundles(&self, entity_type: &str) -> Vec<BundleInfo>;

    /// Field definitions of one bundle.
    fn field_definitions(
        &self,
        entity_type: &str,
        bundle: &str,
    ) -> Result<Vec<FieldDefinition>, InternalError>;

    /// One field definition, if the bundle defines it.
    fn field_definition(
        &self,
        entity_type: &str,
        bundle: &str,
        field: &str,
    ) -> Result<Option<FieldDefinition>, InternalError> {
        Ok(self
            .field_definitions(entity_type, bundle)?
            .into_iter()
            .find(|def| def.name == field))
    }

    /// Every (entity type, bundle) pair the host knows about.
    fn all_bundles(&self) -> Vec<(EntityTypeInfo, BundleInfo)> {
        self.entity_types()
            .into_iter()
            .flat_map(|ty| {
                self.bundles(&ty.id)
                    .into_iter()
                    .map(move |bundle| (ty.clone(), bundle))
            })
            .collect()
    }
}

///
/// EntityStorage
///
/// Entity persistence. `save` is atomic per entity; nothing spans entities.
///

pub trait EntityStorage {
    fn load(&self, handle: &EntityHandle) -> Result<Option<Entity>, InternalError>;

    fn save(&self, entity: &Entity) -> Result<(), InternalError>;
}

///
/// Messenger
///
/// User-facing notification channel.
///

pub trait Messenger {
    fn add_error(&self, message: &str);
}

pub mod fixtures;

use crate::{
    error::InternalError,
    model::{BundleInfo, BundleRef, Entity, EntityHandle, EntityTypeInfo, FieldDefinition},
    obs::{ActionEvent, ActionSink},
    traits::{EntityMetadata, EntityStorage, Messenger},
};
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
};

///
/// InMemoryMetadata
///
/// Builder-populated metadata service for tests.
///

#[derive(Default)]
pub struct InMemoryMetadata {
    types: Vec<EntityTypeInfo>,
    bundles: BTreeMap<String, Vec<BundleInfo>>,
    fields: BTreeMap<BundleRef, Vec<FieldDefinition>>,
    broken: BTreeSet<BundleRef>,
}

impl InMemoryMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, id: &str, label: &str) -> Self {
        self.types.push(EntityTypeInfo::new(id, label));
        self
    }

    #[must_use]
    pub fn with_bundle(mut self, entity_type: &str, bundle: &str, label: &str) -> Self {
        self.bundles
            .entry(entity_type.to_string())
            .or_default()
            .push(BundleInfo::new(bundle, label));
        self
    }

    #[must_use]
    pub fn with_field(mut self, bundle: &BundleRef, def: FieldDefinition) -> Self {
        self.fields.entry(bundle.clone()).or_default().push(def);
        self
    }

    /// Field definition lookups for this bundle fail.
    #[must_use]
    pub fn with_broken_bundle(mut self, bundle: &BundleRef) -> Self {
        self.broken.insert(bundle.clone());
        self
    }
}

impl EntityMetadata for InMemoryMetadata {
    fn entity_types(&self) -> Vec<EntityTypeInfo> {
        self.types.clone()
    }

    fn bundles(&self, entity_type: &str) -> Vec<BundleInfo> {
        self.bundles.get(entity_type).cloned().unwrap_or_default()
    }

    fn field_definitions(
        &self,
        entity_type: &str,
        bundle: &str,
    ) -> Result<Vec<FieldDefinition>, InternalError> {
        let key = BundleRef::new(entity_type, bundle);
        if self.broken.contains(&key) {
            return Err(InternalError::metadata_unresolved(entity_type, bundle));
        }

        Ok(self.fields.get(&key).cloned().unwrap_or_default())
    }
}

///
/// InMemoryStorage
///

#[derive(Default)]
pub struct InMemoryStorage {
    entities: RefCell<BTreeMap<EntityHandle, Entity>>,
    saves: RefCell<Vec<EntityHandle>>,
    reject_saves: Cell<bool>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entity(self, entity: Entity) -> Self {
        self.entities
            .borrow_mut()
            .insert(entity.handle.clone(), entity);
        self
    }

    pub fn reject_saves(&self) {
        self.reject_saves.set(true);
    }

    #[must_use]
    pub fn get(&self, handle: &EntityHandle) -> Option<Entity> {
        self.entities.borrow().get(handle).cloned()
    }

    /// Handles saved so far, in save order.
    #[must_use]
    pub fn saves(&self) -> Vec<EntityHandle> {
        self.saves.borrow().clone()
    }
}

impl EntityStorage for InMemoryStorage {
    fn load(&self, handle: &EntityHandle) -> Result<Option<Entity>, InternalError> {
        Ok(self.get(handle))
    }

    fn save(&self, entity: &Entity) -> Result<(), InternalError> {
        if self.reject_saves.get() {
            return Err(InternalError::storage_save_rejected(
                entity.handle.to_string(),
                "storage is read-only",
            ));
        }

        self.saves.borrow_mut().push(entity.handle.clone());
        self.entities
            .borrow_mut()
            .insert(entity.handle.clone(), entity.clone());

        Ok(())
    }
}

///
/// RecordingMessenger
///

#[derive(Default)]
pub struct RecordingMessenger {
    errors: RefCell<Vec<String>>,
}

impl RecordingMessenger {
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Messenger for RecordingMessenger {
    fn add_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

///
/// RecordingSink
///
/// Captures events as compact labels for assertions.
///

#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<String>>,
}

impl RecordingSink {
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Events whose label starts with `prefix`.
    #[must_use]
    pub fn matching(&self, prefix: &str) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl ActionSink for RecordingSink {
    fn record(&self, event: ActionEvent<'_>) {
        let label = match event {
            ActionEvent::BatchStart { referencing } => format!("batch_start:{referencing}"),
            ActionEvent::BatchFinish { modified, skipped } => {
                format!("batch_finish:{modified}:{skipped}")
            }
            ActionEvent::CacheBuilt {
                rows_scanned,
                referencing,
                referenced,
            } => format!("cache_built:{rows_scanned}:{referencing}:{referenced}"),
            ActionEvent::ReferencingSkipped { id } => format!("referencing_skipped:{id}"),
            ActionEvent::EntitySkipped {
                entity_type,
                bundle,
                reason,
            } => format!("entity_skipped:{entity_type}.{bundle}:{reason:?}"),
            ActionEvent::FieldSkipped {
                entity_type,
                bundle,
                field,
                reason,
            } => format!("field_skipped:{entity_type}.{bundle}.{field}:{reason:?}"),
            ActionEvent::FieldSet {
                entity_type,
                bundle,
                field,
                items,
                ..
            } => format!("field_set:{entity_type}.{bundle}.{field}:{items}"),
            ActionEvent::EntitySaved {
                entity_type,
                bundle,
            } => format!("entity_saved:{entity_type}.{bundle}"),
            ActionEvent::FormBundleSkipped {
                entity_type,
                bundle,
            } => format!("form_bundle_skipped:{entity_type}.{bundle}"),
            ActionEvent::NoContentSelected => "no_content_selected".to_string(),
        };

        self.events.borrow_mut().push(label);
    }
}

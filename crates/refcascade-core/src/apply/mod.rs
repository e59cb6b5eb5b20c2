//! Value application onto referenced entities.

mod merge;


pub use merge::{MergeMode, merge_field_items};

use crate::{
    collect::ReferenceCache,
    config::Configuration,
    error::InternalError,
    model::{Cardinality, EntityHandle, EntityId},
    obs::sink::{self, ActionEvent, FieldSkipReason, SkipReason},
    traits::{EntityMetadata, EntityStorage},
    whitelist::Whitelist,
};
use derive_more::Display;
use std::collections::BTreeMap;

///
/// ExecuteStatus
///
/// Coarse per-referencing-entity outcome reported back to the bulk runner.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ExecuteStatus {
    #[display("Skip (field is not present on this bundle)")]
    Skipped,
    #[display("Modify field values")]
    Modified,
}

impl ExecuteStatus {
    #[must_use]
    pub const fn is_modified(self) -> bool {
        matches!(self, Self::Modified)
    }
}

///
/// ValueApplicator
///
/// Copies configured values onto the entities referenced by one
/// referencing entity. Borrows everything for the lifetime of a batch.
///

pub struct ValueApplicator<'a> {
    configuration: &'a Configuration,
    whitelist: &'a Whitelist,
    cache: &'a ReferenceCache,
    metadata: &'a dyn EntityMetadata,
    storage: &'a dyn EntityStorage,
}

impl<'a> ValueApplicator<'a> {
    #[must_use]
    pub fn new(
        configuration: &'a Configuration,
        whitelist: &'a Whitelist,
        cache: &'a ReferenceCache,
        metadata: &'a dyn EntityMetadata,
        storage: &'a dyn EntityStorage,
    ) -> Self {
        Self {
            configuration,
            whitelist,
            cache,
            metadata,
            storage,
        }
    }

    /// Apply configured values for one referencing entity.
    ///
    /// Each configured referenced entity is saved exactly once; storage and
    /// metadata failures propagate to the caller.
    pub fn apply(&self, referencing: &EntityId) -> Result<ExecuteStatus, InternalError> {
        let Some(handles) = self.cache.get(referencing) else {
            sink::record(ActionEvent::ReferencingSkipped {
                id: referencing.as_str(),
            });
            return Ok(ExecuteStatus::Skipped);
        };

        let mut status = ExecuteStatus::Skipped;
        for handle in handles {
            if self.apply_one(handle)? {
                status = ExecuteStatus::Modified;
            }
        }

        Ok(status)
    }

    // Returns true when the referenced entity was saved.
    fn apply_one(&self, handle: &EntityHandle) -> Result<bool, InternalError> {
        let entity_type = handle.entity_type.as_str();
        let bundle = handle.bundle.as_str();

        let Some(values) = self.configuration.bundle(entity_type, bundle) else {
            sink::record(ActionEvent::EntitySkipped {
                entity_type,
                bundle,
                reason: SkipReason::NotConfigured,
            });
            return Ok(false);
        };

        let Some(mut entity) = self.storage.load(handle)? else {
            sink::record(ActionEvent::EntitySkipped {
                entity_type,
                bundle,
                reason: SkipReason::NotFound,
            });
            return Ok(false);
        };

        if entity.handle.entity_type != handle.entity_type || entity.handle.bundle != handle.bundle
        {
            return Err(InternalError::apply_invariant(format!(
                "loaded entity {} does not match referenced handle {handle}",
                entity.handle
            )));
        }

        let cardinalities: BTreeMap<String, Cardinality> = self
            .metadata
            .field_definitions(entity_type, bundle)?
            .into_iter()
            .map(|def| (def.name, def.cardinality))
            .collect();

        for (field, value) in values {
            if !self.whitelist.is_whitelisted(entity_type, bundle, field) {
                sink::record(ActionEvent::FieldSkipped {
                    entity_type,
                    bundle,
                    field,
                    reason: FieldSkipReason::NotWhitelisted,
                });
                continue;
            }

            let Some(&cardinality) = cardinalities.get(field) else {
                sink::record(ActionEvent::FieldSkipped {
                    entity_type,
                    bundle,
                    field,
                    reason: FieldSkipReason::UnknownField,
                });
                continue;
            };

            let mode = MergeMode::resolve(self.configuration.add_values, cardinality);
            let merged = merge_field_items(entity.items(field), value.clone(), cardinality, mode);
            let items = merged.len() as u64;
            entity.set_items(field.clone(), merged);

            sink::record(ActionEvent::FieldSet {
                entity_type,
                bundle,
                field,
                items,
                appended: mode == MergeMode::Append,
            });
        }

        self.storage.save(&entity)?;
        sink::record(ActionEvent::EntitySaved {
            entity_type,
            bundle,
        });

        Ok(true)
    }
}

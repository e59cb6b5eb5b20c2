use crate::{
    apply::{ExecuteStatus, ValueApplicator},
    collect::{ReferenceCache, collect_references},
    config::{ConfigError, Configuration, Preconfiguration},
    error::InternalError,
    form::{
        self, FormElement, PreconfigurationForm, SelectorForm, build_preconfiguration_form,
        build_selector_form,
    },
    model::{EntityId, ResultRow, SelectedRow},
    obs::sink::{self, ActionEvent},
    traits::{EntityMetadata, EntityStorage, Messenger},
    whitelist::Whitelist,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plugin id the host registers the action under.
pub const ACTION_ID: &str = "views_bulk_reference_edit";

/// Human-readable action label.
pub const ACTION_LABEL: &str = "Modify referenced entity field values";

///
/// ActionContext
///
/// Bulk-operations context handed over by the host runner.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionContext {
    #[serde(default)]
    pub list: Option<Vec<SelectedRow>>,
    #[serde(default)]
    pub selected_count: u64,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub preconfiguration: Preconfiguration,
}

impl ActionContext {
    /// Parse the runner context from host state.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "action context",
            source,
        })
    }

    /// True when rows were selected, or the whole result set is in scope.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.list.as_ref().is_some_and(|list| !list.is_empty())
            || self.selected_count == self.total_results
    }
}

///
/// ModifyReferencedEntityValues
///
/// The bulk action. One instance serves one batch: the whitelist is
/// resolved at construction and the reference cache lives only for the
/// duration of [`Self::execute_multiple`].
///

pub struct ModifyReferencedEntityValues<'a> {
    configuration: Configuration,
    context: ActionContext,
    whitelist: Whitelist,
    metadata: &'a dyn EntityMetadata,
    storage: &'a dyn EntityStorage,
    messenger: &'a dyn Messenger,
}

impl<'a> ModifyReferencedEntityValues<'a> {
    #[must_use]
    pub fn new(
        configuration: Configuration,
        context: ActionContext,
        metadata: &'a dyn EntityMetadata,
        storage: &'a dyn EntityStorage,
        messenger: &'a dyn Messenger,
    ) -> Self {
        let whitelist = Whitelist::from_preconfiguration(&context.preconfiguration);

        Self {
            configuration,
            context,
            whitelist,
            metadata,
            storage,
            messenger,
        }
    }

    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    #[must_use]
    pub const fn context(&self) -> &ActionContext {
        &self.context
    }

    #[must_use]
    pub const fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Batch entry point: collect references once, then execute for each
    /// referencing entity in order.
    pub fn execute_multiple(
        &self,
        rows: &[ResultRow],
        referencing: &[EntityId],
    ) -> Result<Vec<ExecuteStatus>, InternalError> {
        sink::record(ActionEvent::BatchStart {
            referencing: referencing.len() as u64,
        });

        let cache = collect_references(self.context.list.as_deref(), rows);
        let statuses = referencing
            .iter()
            .map(|id| self.execute(&cache, id))
            .collect::<Result<Vec<_>, _>>()?;

        let modified = statuses.iter().filter(|s| s.is_modified()).count() as u64;
        sink::record(ActionEvent::BatchFinish {
            modified,
            skipped: statuses.len() as u64 - modified,
        });

        Ok(statuses)
    }

    /// Apply configured values for one referencing entity.
    pub fn execute(
        &self,
        cache: &ReferenceCache,
        referencing: &EntityId,
    ) -> Result<ExecuteStatus, InternalError> {
        ValueApplicator::new(
            &self.configuration,
            &self.whitelist,
            cache,
            self.metadata,
            self.storage,
        )
        .apply(referencing)
    }

    /// Whitelist form, seeded from previously stored preconfiguration.
    #[must_use]
    pub fn build_preconfiguration_form(&self, stored: &Preconfiguration) -> PreconfigurationForm {
        build_preconfiguration_form(self.metadata, stored)
    }

    /// Bundles offered on the per-run configuration form.
    #[must_use]
    pub fn view_bundles(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        form::view_bundles(&self.context, self.metadata, self.messenger)
    }

    /// Per-field selector for one bundle's entity edit form.
    #[must_use]
    pub fn selector_form(
        &self,
        entity_type: &str,
        bundle: &str,
        elements: &mut [FormElement],
    ) -> SelectorForm {
        build_selector_form(entity_type, bundle, &self.whitelist, elements)
    }
}

///
/// TESTS
///

use crate::{
    action::ActionContext,
    config::{Preconfiguration, WhitelistFlag},
    model::bundle_key,
    obs::sink::{self, ActionEvent},
    traits::{EntityMetadata, Messenger},
    whitelist::Whitelist,
};
use std::collections::BTreeMap;

/// User-facing error posted when the view has nothing selected.
pub const NO_CONTENT_SELECTED: &str = "No content selected";

///
/// CheckboxGroup
///
/// Whitelist checkbox group for one bundle. Option keys and labels are
/// both the field machine name.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckboxGroup {
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub default_value: BTreeMap<String, WhitelistFlag>,
}

///
/// BundleSection
///
/// Collapsible section holding one bundle's whitelist.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BundleSection {
    pub key: String,
    pub title: String,
    pub open: bool,
    pub whitelist: CheckboxGroup,
}

///
/// PreconfigurationForm
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PreconfigurationForm {
    pub sections: Vec<BundleSection>,
}

impl PreconfigurationForm {
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&BundleSection> {
        self.sections.iter().find(|s| s.key == key)
    }
}

/// Build the whitelist form: one section per known bundle.
///
/// Bundles whose field definitions cannot be resolved are left out; the
/// rest of the form is still built.
#[must_use]
pub fn build_preconfiguration_form(
    metadata: &dyn EntityMetadata,
    stored: &Preconfiguration,
) -> PreconfigurationForm {
    let mut sections = Vec::new();

    for (entity_type, bundle) in metadata.all_bundles() {
        let Ok(definitions) = metadata.field_definitions(&entity_type.id, &bundle.id) else {
            sink::record(ActionEvent::FormBundleSkipped {
                entity_type: &entity_type.id,
                bundle: &bundle.id,
            });
            continue;
        };

        let key = bundle_key(&entity_type.id, &bundle.id);
        let default_value = stored
            .entry_by_key(&key)
            .map(|entry| entry.whitelist.clone())
            .unwrap_or_default();

        sections.push(BundleSection {
            title: format!("{} - {}", entity_type.id, bundle.id),
            open: false,
            whitelist: CheckboxGroup {
                title: format!(
                    "Whitelisted fields for bundle {} for entity {}.",
                    bundle.label, entity_type.label
                ),
                description: "Whitelist supported bundles.".to_string(),
                options: definitions.into_iter().map(|def| def.name).collect(),
                default_value,
            },
            key,
        });
    }

    PreconfigurationForm { sections }
}

/// Bundle labels by entity type, then bundle, for every preconfigured
/// bundle with at least one whitelisted field.
///
/// With no selection (and not every result in scope) the operator gets
/// an error message and the map is empty.
pub fn view_bundles(
    context: &ActionContext,
    metadata: &dyn EntityMetadata,
    messenger: &dyn Messenger,
) -> BTreeMap<String, BTreeMap<String, String>> {
    if !context.has_selection() {
        messenger.add_error(NO_CONTENT_SELECTED);
        sink::record(ActionEvent::NoContentSelected);
        return BTreeMap::new();
    }

    let known: BTreeMap<String, (String, String, String)> = metadata
        .all_bundles()
        .into_iter()
        .map(|(ty, bundle)| {
            let key = bundle_key(&ty.id, &bundle.id);
            (key, (ty.id, bundle.id, bundle.label))
        })
        .collect();

    let whitelist = Whitelist::from_preconfiguration(&context.preconfiguration);
    let mut out: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for key in whitelist.keys_with_fields() {
        // Stale keys for bundles the host no longer knows are ignored.
        let Some((entity_type, bundle, label)) = known.get(key) else {
            continue;
        };

        out.entry(entity_type.clone())
            .or_default()
            .insert(bundle.clone(), label.clone());
    }

    out
}

///
/// TESTS
///

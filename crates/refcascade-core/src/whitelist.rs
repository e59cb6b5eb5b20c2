use crate::{
    config::Preconfiguration,
    model::{BundleRef, bundle_key},
};
use std::collections::{BTreeMap, BTreeSet};

///
/// Whitelist
///
/// Resolved whitelist for one batch, keyed like the preconfiguration.
/// Built once when the action is constructed.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Whitelist {
    fields: BTreeMap<String, BTreeSet<String>>,
}

impl Whitelist {
    #[must_use]
    pub fn from_preconfiguration(preconfiguration: &Preconfiguration) -> Self {
        let fields = preconfiguration
            .iter()
            .map(|(key, entry)| (key.to_string(), entry.whitelisted_fields()))
            .collect();

        Self { fields }
    }

    /// True when `field` is whitelisted for (entity type, bundle).
    /// A bundle with no preconfiguration whitelists nothing.
    #[must_use]
    pub fn is_whitelisted(&self, entity_type: &str, bundle: &str, field: &str) -> bool {
        self.fields
            .get(&bundle_key(entity_type, bundle))
            .is_some_and(|fields| fields.contains(field))
    }

    /// Whitelisted fields for one bundle.
    #[must_use]
    pub fn fields(&self, bundle: &BundleRef) -> Option<&BTreeSet<String>> {
        self.fields.get(&bundle.key())
    }

    /// Preconfiguration keys with at least one whitelisted field.
    pub fn keys_with_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, fields)| !fields.is_empty())
            .map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys_with_fields().next().is_none()
    }
}

///
/// TESTS
///

use crate::{
    model::{EntityHandle, EntityId, ResultRow, SelectedRow},
    obs::sink::{self, ActionEvent},
};
use std::collections::{BTreeMap, BTreeSet};

///
/// ReferenceCache
///
/// Referenced entity handles per selected referencing entity id, in
/// encounter order. Built once per batch and read-only afterwards.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReferenceCache {
    entries: BTreeMap<EntityId, Vec<EntityHandle>>,
}

impl ReferenceCache {
    /// Handles referenced by one referencing entity; `None` when the id
    /// was not selected or produced no relationships.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&[EntityHandle]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Number of referencing entities with at least one reference.
    #[must_use]
    pub fn referencing_len(&self) -> usize {
        self.entries.len()
    }

    /// Total referenced handles across all referencing entities.
    #[must_use]
    pub fn referenced_len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &[EntityHandle])> {
        self.entries
            .iter()
            .map(|(id, handles)| (id, handles.as_slice()))
    }
}

/// Build the reference cache in one pass over the view rows.
///
/// Only rows whose id appears in `list` contribute. A missing list yields
/// an empty cache rather than an error.
#[must_use]
pub fn collect_references(list: Option<&[SelectedRow]>, rows: &[ResultRow]) -> ReferenceCache {
    let selected: BTreeSet<&EntityId> = list
        .unwrap_or_default()
        .iter()
        .map(SelectedRow::id)
        .collect();

    let mut entries: BTreeMap<EntityId, Vec<EntityHandle>> = BTreeMap::new();
    if !selected.is_empty() {
        for row in rows {
            if !selected.contains(&row.id) || row.relationships.is_empty() {
                continue;
            }

            entries
                .entry(row.id.clone())
                .or_default()
                .extend(row.relationships.iter().map(|(_, handle)| handle.clone()));
        }
    }

    let cache = ReferenceCache { entries };
    sink::record(ActionEvent::CacheBuilt {
        rows_scanned: rows.len() as u64,
        referencing: cache.referencing_len() as u64,
        referenced: cache.referenced_len() as u64,
    });

    cache
}

///
/// TESTS
///

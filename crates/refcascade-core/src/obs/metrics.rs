use crate::model::bundle_key;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// ActionState
/// Ephemeral, in-memory counters for bulk reference edits.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ActionState {
    pub ops: ActionOps,
    pub bundles: BTreeMap<String, BundleCounters>,
}

///
/// ActionOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ActionOps {
    // Batches
    pub batches: u64,
    pub referencing_seen: u64,
    pub referencing_modified: u64,
    pub referencing_skipped: u64,

    // Collection
    pub rows_scanned: u64,
    pub references_cached: u64,

    // Referenced entities
    pub entities_saved: u64,
    pub entities_unconfigured: u64,
    pub entities_missing: u64,

    // Fields
    pub fields_replaced: u64,
    pub fields_appended: u64,
    pub fields_not_whitelisted: u64,
    pub fields_unknown: u64,

    // Forms
    pub form_bundles_skipped: u64,
    pub no_content_selected: u64,
}

///
/// BundleCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BundleCounters {
    pub entities_saved: u64,
    pub entities_skipped: u64,
    pub fields_set: u64,
    pub fields_skipped: u64,
    pub items_written: u64,
}

/// ActionReport
/// Point-in-time snapshot handed to callers.
pub type ActionReport = ActionState;

thread_local! {
    static ACTION_STATE: RefCell<ActionState> = RefCell::new(ActionState::default());
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut ActionState) -> R) -> R {
    ACTION_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Borrow counters plus the per-bundle entry for one bundle.
pub(crate) fn with_bundle_mut<R>(
    entity_type: &str,
    bundle: &str,
    f: impl FnOnce(&mut ActionState, &mut BundleCounters) -> R,
) -> R {
    with_state_mut(|m| {
        let key = bundle_key(entity_type, bundle);
        let mut entry = m.bundles.remove(&key).unwrap_or_default();
        let out = f(m, &mut entry);
        m.bundles.insert(key, entry);
        out
    })
}

/// Snapshot all counters.
#[must_use]
pub(crate) fn report() -> ActionReport {
    ACTION_STATE.with(|m| m.borrow().clone())
}

/// Reset all counters (useful in tests).
pub(crate) fn reset() {
    with_state_mut(|m| *m = ActionState::default());
}

//! Action event sink boundary.
//!
//! Collector, applicator and form code MUST NOT touch obs::metrics directly.
//! All instrumentation flows through ActionEvent and ActionSink.
use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn ActionSink>>> = RefCell::new(None);
}

///
/// SkipReason
/// Why a referenced entity was left untouched.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    NotConfigured,
    NotFound,
}

///
/// FieldSkipReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldSkipReason {
    NotWhitelisted,
    UnknownField,
}

///
/// ActionEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionEvent<'a> {
    BatchStart { referencing: u64 },
    BatchFinish { modified: u64, skipped: u64 },
    CacheBuilt {
        rows_scanned: u64,
        referencing: u64,
        referenced: u64,
    },
    ReferencingSkipped { id: &'a str },
    EntitySkipped {
        entity_type: &'a str,
        bundle: &'a str,
        reason: SkipReason,
    },
    FieldSkipped {
        entity_type: &'a str,
        bundle: &'a str,
        field: &'a str,
        reason: FieldSkipReason,
    },
    FieldSet {
        entity_type: &'a str,
        bundle: &'a str,
        field: &'a str,
        items: u64,
        appended: bool,
    },
    EntitySaved {
        entity_type: &'a str,
        bundle: &'a str,
    },
    FormBundleSkipped {
        entity_type: &'a str,
        bundle: &'a str,
    },
    NoContentSelected,
}

///
/// ActionSink
///

pub trait ActionSink {
    fn record(&self, event: ActionEvent<'_>);
}

/// GlobalActionSink
/// Default thread-local sink that writes into the counters in `metrics`.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalActionSink;

impl ActionSink for GlobalActionSink {
    fn record(&self, event: ActionEvent<'_>) {
        match event {
            ActionEvent::BatchStart { referencing } => {
                metrics::with_state_mut(|m| {
                    m.ops.batches = m.ops.batches.saturating_add(1);
                    m.ops.referencing_seen = m.ops.referencing_seen.saturating_add(referencing);
                });
            }

            ActionEvent::BatchFinish { modified, skipped } => {
                metrics::with_state_mut(|m| {
                    m.ops.referencing_modified =
                        m.ops.referencing_modified.saturating_add(modified);
                    m.ops.referencing_skipped = m.ops.referencing_skipped.saturating_add(skipped);
                });
            }

            ActionEvent::CacheBuilt {
                rows_scanned,
                referenced,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
                    m.ops.references_cached = m.ops.references_cached.saturating_add(referenced);
                });
            }

            ActionEvent::ReferencingSkipped { .. } => {}

            ActionEvent::EntitySkipped {
                entity_type,
                bundle,
                reason,
            } => {
                metrics::with_bundle_mut(entity_type, bundle, |m, entry| {
                    match reason {
                        SkipReason::NotConfigured => {
                            m.ops.entities_unconfigured =
                                m.ops.entities_unconfigured.saturating_add(1);
                        }
                        SkipReason::NotFound => {
                            m.ops.entities_missing = m.ops.entities_missing.saturating_add(1);
                        }
                    }
                    entry.entities_skipped = entry.entities_skipped.saturating_add(1);
                });
            }

            ActionEvent::FieldSkipped {
                entity_type,
                bundle,
                reason,
                ..
            } => {
                metrics::with_bundle_mut(entity_type, bundle, |m, entry| {
                    match reason {
                        FieldSkipReason::NotWhitelisted => {
                            m.ops.fields_not_whitelisted =
                                m.ops.fields_not_whitelisted.saturating_add(1);
                        }
                        FieldSkipReason::UnknownField => {
                            m.ops.fields_unknown = m.ops.fields_unknown.saturating_add(1);
                        }
                    }
                    entry.fields_skipped = entry.fields_skipped.saturating_add(1);
                });
            }

            ActionEvent::FieldSet {
                entity_type,
                bundle,
                items,
                appended,
                ..
            } => {
                metrics::with_bundle_mut(entity_type, bundle, |m, entry| {
                    if appended {
                        m.ops.fields_appended = m.ops.fields_appended.saturating_add(1);
                    } else {
                        m.ops.fields_replaced = m.ops.fields_replaced.saturating_add(1);
                    }
                    entry.fields_set = entry.fields_set.saturating_add(1);
                    entry.items_written = entry.items_written.saturating_add(items);
                });
            }

            ActionEvent::EntitySaved {
                entity_type,
                bundle,
            } => {
                metrics::with_bundle_mut(entity_type, bundle, |m, entry| {
                    m.ops.entities_saved = m.ops.entities_saved.saturating_add(1);
                    entry.entities_saved = entry.entities_saved.saturating_add(1);
                });
            }

            ActionEvent::FormBundleSkipped { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.form_bundles_skipped = m.ops.form_bundles_skipped.saturating_add(1);
                });
            }

            ActionEvent::NoContentSelected => {
                metrics::with_state_mut(|m| {
                    m.ops.no_content_selected = m.ops.no_content_selected.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_ACTION_SINK: GlobalActionSink = GlobalActionSink;

pub(crate) fn record(event: ActionEvent<'_>) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_ACTION_SINK.record(event),
    }
}

/// Snapshot the current action counters.
#[must_use]
pub fn action_report() -> metrics::ActionReport {
    metrics::report()
}

/// Reset all action counters.
pub fn action_reset_all() {
    metrics::reset();
}

/// Run a closure with a temporary sink override.
pub fn with_action_sink<T>(sink: Rc<dyn ActionSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn ActionSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSink;

    #[test]
    fn override_captures_events_and_restores() {
        action_reset_all();
        let sink = Rc::new(RecordingSink::default());

        with_action_sink(sink.clone(), || {
            record(ActionEvent::NoContentSelected);
        });
        record(ActionEvent::NoContentSelected);

        assert_eq!(sink.events(), vec!["no_content_selected".to_string()]);
        assert_eq!(action_report().ops.no_content_selected, 1);
    }

    #[test]
    fn nested_overrides_restore_outer_sink() {
        let outer = Rc::new(RecordingSink::default());
        let inner = Rc::new(RecordingSink::default());

        with_action_sink(outer.clone(), || {
            with_action_sink(inner.clone(), || {
                record(ActionEvent::BatchStart { referencing: 2 });
            });
            record(ActionEvent::BatchFinish {
                modified: 1,
                skipped: 1,
            });
        });

        assert_eq!(inner.events(), vec!["batch_start:2".to_string()]);
        assert_eq!(outer.events(), vec!["batch_finish:1:1".to_string()]);
    }

    #[test]
    fn global_sink_counts_per_bundle() {
        action_reset_all();

        record(ActionEvent::FieldSet {
            entity_type: "taxonomy_term",
            bundle: "tags",
            field: "name",
            items: 2,
            appended: true,
        });
        record(ActionEvent::EntitySaved {
            entity_type: "taxonomy_term",
            bundle: "tags",
        });

        let report = action_report();
        assert_eq!(report.ops.fields_appended, 1);
        assert_eq!(report.ops.entities_saved, 1);

        let tags = &report.bundles["taxonomy_term_tags"];
        assert_eq!(tags.items_written, 2);
        assert_eq!(tags.entities_saved, 1);
    }
}

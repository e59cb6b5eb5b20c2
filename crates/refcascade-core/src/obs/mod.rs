//! Observability: action counters and the sink abstraction.
//!
//! Nothing here affects execution; events are recorded after the fact.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{ActionOps, ActionReport, ActionState, BundleCounters};
pub use sink::{
    ActionEvent, ActionSink, FieldSkipReason, SkipReason, action_report, action_reset_all,
    with_action_sink,
};

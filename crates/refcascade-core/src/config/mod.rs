//! Administrator configuration ingested from host form state.
//!
//! Two layers exist: the [`Preconfiguration`] captured once when the action
//! is attached to a view (the field whitelist), and the per-run
//! [`Configuration`] carrying the new field values.

mod configuration;
mod preconfig;

pub use configuration::{BundleValues, Configuration};
pub use preconfig::{PreconfigEntry, Preconfiguration, WhitelistFlag};

use thiserror::Error as ThisError;

///
/// ConfigError
///
/// Failures while reading configuration from host form state.
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid '_add_values' flag: {found}")]
    InvalidAddValues { found: String },

    #[error("invalid whitelist flag: {found}")]
    InvalidWhitelistFlag { found: String },
}

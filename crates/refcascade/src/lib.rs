//! ## Crate layout
//! - `core`: whitelist resolution, reference collection, value application,
//!   form models, and observability.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module mirrors the surface a host integration needs.

pub use refcascade_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::action::{ACTION_ID, ACTION_LABEL};
pub use error::Error;

///
/// Host Prelude
///

pub mod prelude {
    pub use crate::{
        core::{
            action::{ActionContext, ModifyReferencedEntityValues},
            apply::ExecuteStatus,
            config::{Configuration, Preconfiguration},
            form::{FormElement, PreconfigurationForm, SelectorForm},
            model::{
                BundleInfo, BundleRef, Cardinality, Entity, EntityHandle, EntityId, EntityTypeInfo,
                FieldDefinition, ResultRow, SelectedRow,
            },
            traits::{EntityMetadata, EntityStorage, Messenger},
            value::{FieldValue, Value},
        },
        error::Error,
    };
}

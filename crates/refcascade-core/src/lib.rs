//! Core runtime for refcascade: whitelist resolution, reference collection,
//! value application, form models, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod action;
pub mod apply;
pub mod collect;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod obs;
pub mod traits;
pub mod value;
pub mod whitelist;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// Errors and sinks stay in their own modules.
///

pub mod prelude {
    pub use crate::{
        action::{ActionContext, ModifyReferencedEntityValues},
        apply::ExecuteStatus,
        config::{Configuration, Preconfiguration},
        model::{BundleRef, Cardinality, Entity, EntityHandle, EntityId, ResultRow, SelectedRow},
        traits::{EntityMetadata, EntityStorage, Messenger},
        value::{FieldValue, Value},
    };
}

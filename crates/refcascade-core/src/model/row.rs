use crate::model::entity::{EntityHandle, EntityId};
use serde::{Deserialize, Serialize};

///
/// SelectedRow
///
/// One row the operator selected in the bulk-operations view.
/// Serialized as the host's positional tuple
/// `[index, langcode, entity_type, id]`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SelectedRow(pub u64, pub String, pub String, pub EntityId);

impl SelectedRow {
    #[must_use]
    pub fn new(
        index: u64,
        langcode: impl Into<String>,
        entity_type: impl Into<String>,
        id: impl Into<EntityId>,
    ) -> Self {
        Self(index, langcode.into(), entity_type.into(), id.into())
    }

    #[must_use]
    pub const fn index(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn langcode(&self) -> &str {
        &self.1
    }

    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.2
    }

    #[must_use]
    pub const fn id(&self) -> &EntityId {
        &self.3
    }
}

///
/// ResultRow
///
/// One view result row: the referencing entity id plus its relationship
/// bag, in the order the view produced the relationships.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResultRow {
    pub id: EntityId,
    #[serde(default)]
    pub relationships: Vec<(String, EntityHandle)>,
}

impl ResultRow {
    #[must_use]
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            relationships: Vec::new(),
        }
    }

    /// Builder-style relationship push.
    #[must_use]
    pub fn with_relationship(mut self, key: impl Into<String>, handle: EntityHandle) -> Self {
        self.relationships.push((key.into(), handle));
        self
    }
}

///
/// TESTS
///

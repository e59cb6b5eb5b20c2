//! Shared scenario: articles tagged with taxonomy terms and authored by users.

use crate::{
    config::Preconfiguration,
    model::{
        BundleRef, Cardinality, Entity, EntityHandle, FieldDefinition, ResultRow, SelectedRow,
    },
    test_support::{InMemoryMetadata, InMemoryStorage},
    value::Value,
};

pub fn tags() -> BundleRef {
    BundleRef::new("taxonomy_term", "tags")
}

pub fn users() -> BundleRef {
    BundleRef::new("user", "user")
}

pub fn articles() -> BundleRef {
    BundleRef::new("node", "article")
}

pub fn term(id: u64) -> EntityHandle {
    EntityHandle::new("taxonomy_term", "tags", id)
}

pub fn author(id: u64) -> EntityHandle {
    EntityHandle::new("user", "user", id)
}

pub fn texts(items: &[&str]) -> Vec<Value> {
    items.iter().copied().map(Value::from).collect()
}

pub fn metadata() -> InMemoryMetadata {
    let pair = Cardinality::limited(2).expect("non-zero bound");

    InMemoryMetadata::new()
        .with_type("node", "Content")
        .with_type("taxonomy_term", "Taxonomy term")
        .with_type("user", "User")
        .with_bundle("node", "article", "Article")
        .with_bundle("node", "page", "Basic page")
        .with_bundle("taxonomy_term", "tags", "Tags")
        .with_bundle("user", "user", "User")
        .with_field(
            &articles(),
            FieldDefinition::new("title", "Title", Cardinality::SINGLE),
        )
        .with_field(
            &articles(),
            FieldDefinition::new("field_tags", "Tags", Cardinality::Unlimited),
        )
        .with_field(
            &tags(),
            FieldDefinition::new("name", "Name", Cardinality::SINGLE),
        )
        .with_field(
            &tags(),
            FieldDefinition::new("field_color", "Color", Cardinality::SINGLE),
        )
        .with_field(
            &tags(),
            FieldDefinition::new("field_synonyms", "Synonyms", Cardinality::Unlimited),
        )
        .with_field(
            &tags(),
            FieldDefinition::new("field_related", "Related", pair),
        )
        .with_field(
            &tags(),
            FieldDefinition::new("field_weight", "Weight", Cardinality::SINGLE),
        )
        .with_field(
            &users(),
            FieldDefinition::new("name", "Name", Cardinality::SINGLE),
        )
        .with_field(
            &users(),
            FieldDefinition::new("field_bio", "Biography", Cardinality::SINGLE),
        )
}

pub fn storage() -> InMemoryStorage {
    InMemoryStorage::new()
        .with_entity(
            Entity::new(term(10))
                .with_field("name", texts(&["rust"]))
                .with_field("field_synonyms", texts(&["x"]))
                .with_field("field_related", texts(&["x"])),
        )
        .with_entity(Entity::new(term(11)).with_field("name", texts(&["go"])))
        .with_entity(Entity::new(term(12)).with_field("name", texts(&["zig"])))
        .with_entity(Entity::new(author(7)).with_field("name", texts(&["ada"])))
}

/// Whitelist: every tag field; user bio is unchecked.
pub fn preconfiguration() -> Preconfiguration {
    Preconfiguration::new()
        .with_whitelist(
            &tags(),
            [
                "name",
                "field_color",
                "field_synonyms",
                "field_related",
                "field_weight",
            ],
        )
        .with_unchecked(&users(), "field_bio")
}

/// Articles 1 and 2 are selected; article 3 is in the view but not selected.
pub fn selected() -> Vec<SelectedRow> {
    vec![
        SelectedRow::new(0, "en", "node", 1u64),
        SelectedRow::new(1, "en", "node", 2u64),
    ]
}

pub fn rows() -> Vec<ResultRow> {
    vec![
        ResultRow::new(1u64)
            .with_relationship("field_tags", term(10))
            .with_relationship("uid", author(7)),
        ResultRow::new(2u64).with_relationship("field_tags", term(11)),
        ResultRow::new(3u64).with_relationship("field_tags", term(12)),
    ]
}

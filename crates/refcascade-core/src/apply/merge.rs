use crate::{
    model::Cardinality,
    value::{FieldValue, Value},
};

///
/// MergeMode
///
/// How one configured value lands on a field.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeMode {
    Replace,
    Append,
}

impl MergeMode {
    /// Append only applies to multi-valued fields; single-valued fields
    /// are always replaced.
    #[must_use]
    pub const fn resolve(add_values: bool, cardinality: Cardinality) -> Self {
        if add_values && cardinality.is_multiple() {
            Self::Append
        } else {
            Self::Replace
        }
    }
}

/// Merge a configured value into a field's current items.
///
/// `Append` keeps `current` and pushes new items in configured order until
/// the cardinality bound is reached; the excess is dropped silently.
/// `Replace` discards `current`.
#[must_use]
pub fn merge_field_items(
    current: &[Value],
    new: FieldValue,
    cardinality: Cardinality,
    mode: MergeMode,
) -> Vec<Value> {
    match mode {
        MergeMode::Replace => new.into_items(),
        MergeMode::Append => {
            let mut merged = current.to_vec();
            for item in new.into_items() {
                if cardinality.is_full(merged.len()) {
                    break;
                }
                merged.push(item);
            }

            merged
        }
    }
}

///
/// TESTS
///

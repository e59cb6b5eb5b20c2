use crate::{config::ConfigError, model::BundleRef, value::FieldValue};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::BTreeMap;

/// New values for one bundle, keyed by field machine name.
pub type BundleValues = BTreeMap<String, FieldValue>;

///
/// Configuration
///
/// Per-run field values keyed by entity type, then bundle.
/// `_add_values` switches multi-valued fields from replace to append.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Configuration {
    #[serde(
        rename = "_add_values",
        default,
        deserialize_with = "deserialize_add_values"
    )]
    pub add_values: bool,

    #[serde(flatten)]
    values: BTreeMap<String, BTreeMap<String, BundleValues>>,
}

impl Configuration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from host form state.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "configuration",
            source,
        })
    }

    #[must_use]
    pub const fn with_add_values(mut self, add_values: bool) -> Self {
        self.add_values = add_values;
        self
    }

    /// Builder-style value assignment.
    #[must_use]
    pub fn with_value(
        mut self,
        bundle: &BundleRef,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.values
            .entry(bundle.entity_type.clone())
            .or_default()
            .entry(bundle.bundle.clone())
            .or_default()
            .insert(field.into(), value.into());
        self
    }

    /// Configured values for one bundle, if any were configured.
    #[must_use]
    pub fn bundle(&self, entity_type: &str, bundle: &str) -> Option<&BundleValues> {
        self.values.get(entity_type)?.get(bundle)
    }

    /// Every configured (bundle, values) pair.
    pub fn iter(&self) -> impl Iterator<Item = (BundleRef, &BundleValues)> {
        self.values.iter().flat_map(|(entity_type, bundles)| {
            bundles
                .iter()
                .map(move |(bundle, values)| (BundleRef::new(entity_type, bundle), values))
        })
    }
}

// Hosts persist checkbox state as bool, 0/1 or their string forms.
fn parse_add_values(raw: &serde_json::Value) -> Result<bool, ConfigError> {
    use serde_json::Value as Json;

    match raw {
        Json::Null => Ok(false),
        Json::Bool(b) => Ok(*b),
        Json::Number(n) if n.as_u64() == Some(0) => Ok(false),
        Json::Number(n) if n.as_u64() == Some(1) => Ok(true),
        Json::String(s) if s.is_empty() || s == "0" => Ok(false),
        Json::String(s) if s == "1" => Ok(true),
        other => Err(ConfigError::InvalidAddValues {
            found: other.to_string(),
        }),
    }
}

fn deserialize_add_values<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;

    parse_add_values(&raw).map_err(de::Error::custom)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn reads_host_form_state() {
        let config = Configuration::from_json(
            r#"{
                "_add_values": 1,
                "taxonomy_term": {
                    "tags": {
                        "field_color": "red",
                        "field_related": [{"target_id": 3}, {"target_id": 4}]
                    }
                }
            }"#,
        )
        .unwrap();

        assert!(config.add_values);

        let values = config.bundle("taxonomy_term", "tags").unwrap();
        assert_eq!(values["field_color"], FieldValue::from("red"));
        assert_eq!(
            values["field_related"],
            FieldValue::Many(vec![Value::reference(3u64), Value::reference(4u64)])
        );
        assert!(config.bundle("taxonomy_term", "other").is_none());
    }

    #[test]
    fn reads_decimal_values() {
        let config = Configuration::from_json(
            r#"{"commerce_product": {"default": {"field_price": 9.99, "field_rates": [0.5, 2]}}}"#,
        )
        .unwrap();

        let values = config.bundle("commerce_product", "default").unwrap();
        assert_eq!(
            values["field_price"],
            FieldValue::from(Value::float(9.99).unwrap())
        );
        assert_eq!(
            values["field_rates"],
            FieldValue::Many(vec![Value::float(0.5).unwrap(), Value::Uint(2)])
        );
    }

    #[test]
    fn add_values_defaults_to_replace() {
        let config = Configuration::from_json(r#"{"node": {"page": {"title": "x"}}}"#).unwrap();

        assert!(!config.add_values);
        assert_eq!(config.iter().count(), 1);
    }

    #[test]
    fn add_values_accepts_loose_host_typing() {
        for (raw, expected) in [
            ("true", true),
            ("false", false),
            ("0", false),
            ("1", true),
            (r#""1""#, true),
            (r#""0""#, false),
            (r#""""#, false),
            ("null", false),
        ] {
            let json = format!(r#"{{"_add_values": {raw}}}"#);
            let config = Configuration::from_json(&json).unwrap();
            assert_eq!(config.add_values, expected, "raw flag {raw}");
        }
    }

    #[test]
    fn add_values_rejects_garbage() {
        let err = Configuration::from_json(r#"{"_add_values": "maybe"}"#).unwrap_err();

        assert!(err.to_string().contains("invalid '_add_values' flag"));
    }
}

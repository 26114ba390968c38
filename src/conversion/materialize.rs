//! JSON to structured object conversion
//!
//! [`convert_to_object`] materializes a response into an [`ObjectValue`]
//! tree, picking each object's kind from its `"object"` field.
//! [`flatten`] goes the other way and drops all request metadata.

use crate::conversion::registry::object_kind_for;
use crate::core::config::ClientConfig;
use crate::models::object::{ObjectKind, ObjectValue, ResponseMetadata, StructuredResponse};
use crate::models::response::RawServiceResponse;
use indexmap::IndexMap;
use serde_json::Value;

/// Input accepted by [`convert_to_object`]
#[derive(Debug, Clone)]
pub enum Payload {
    /// Response body with transport metadata
    Raw(RawServiceResponse),
    /// Plain JSON
    Plain(Value),
    /// Already materialized; returned as is
    Structured(ObjectValue),
}

impl From<RawServiceResponse> for Payload {
    fn from(raw: RawServiceResponse) -> Self {
        Payload::Raw(raw)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Plain(value)
    }
}

impl From<ObjectValue> for Payload {
    fn from(value: ObjectValue) -> Self {
        Payload::Structured(value)
    }
}

impl From<StructuredResponse> for Payload {
    fn from(obj: StructuredResponse) -> Self {
        Payload::Structured(ObjectValue::Object(obj))
    }
}

/// Metadata attached to materialized objects
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub organization: Option<String>,
    pub engine: Option<String>,
    /// Skip structuring and hand back plain JSON
    pub plain_old_data: bool,
}

impl ConvertOptions {
    /// Options carrying the version and organization of `config`
    pub fn from_config(config: &ClientConfig, api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_version: config.api_version.clone(),
            organization: config.organization.clone(),
            engine: None,
            plain_old_data: false,
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn plain(mut self) -> Self {
        self.plain_old_data = true;
        self
    }
}

/// Result of [`convert_to_object`]
#[derive(Debug, Clone, PartialEq)]
pub enum Materialized {
    Plain(Value),
    Structured(ObjectValue),
}

impl Materialized {
    pub fn into_structured(self) -> Option<ObjectValue> {
        match self {
            Materialized::Structured(value) => Some(value),
            Materialized::Plain(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&StructuredResponse> {
        match self {
            Materialized::Structured(value) => value.as_object(),
            Materialized::Plain(_) => None,
        }
    }

    /// Plain JSON form, without metadata
    pub fn flatten(&self) -> Value {
        match self {
            Materialized::Plain(value) => value.clone(),
            Materialized::Structured(value) => flatten(value),
        }
    }
}

/// Materialize a response payload
///
/// A [`RawServiceResponse`] contributes its organization and response time,
/// replacing the organization in `options`. With `plain_old_data` set the
/// unwrapped JSON is returned untouched.
pub fn convert_to_object(payload: impl Into<Payload>, options: &ConvertOptions) -> Materialized {
    let mut organization = options.organization.clone();
    let mut response_ms = None;

    let value = match payload.into() {
        Payload::Structured(value) => return Materialized::Structured(value),
        Payload::Raw(raw) => {
            organization = raw.organization;
            response_ms = raw.response_ms;
            raw.data
        }
        Payload::Plain(value) => value,
    };

    if options.plain_old_data {
        return Materialized::Plain(value);
    }

    let metadata = ResponseMetadata {
        api_key: options.api_key.clone(),
        api_version: options.api_version.clone(),
        organization,
        response_ms,
        engine: options.engine.clone(),
    };
    Materialized::Structured(materialize_value(value, &metadata))
}

fn materialize_value(value: Value, metadata: &ResponseMetadata) -> ObjectValue {
    match value {
        Value::Null => ObjectValue::Null,
        Value::Bool(b) => ObjectValue::Bool(b),
        Value::Number(n) => ObjectValue::Number(n),
        Value::String(s) => ObjectValue::String(s),
        Value::Array(items) => {
            // elements keep the engine but not the response time
            let element_metadata = ResponseMetadata {
                response_ms: None,
                ..metadata.clone()
            };
            ObjectValue::Array(
                items
                    .into_iter()
                    .map(|item| materialize_value(item, &element_metadata))
                    .collect(),
            )
        }
        Value::Object(map) => {
            let kind = match map.get("object") {
                Some(Value::String(tag)) => object_kind_for(tag),
                _ => ObjectKind::Generic,
            };

            // nested values only carry the credential, version and organization
            let nested_metadata = ResponseMetadata {
                api_key: metadata.api_key.clone(),
                api_version: metadata.api_version.clone(),
                organization: metadata.organization.clone(),
                response_ms: None,
                engine: None,
            };
            let fields: IndexMap<String, ObjectValue> = map
                .into_iter()
                .map(|(key, value)| (key, materialize_value(value, &nested_metadata)))
                .collect();

            ObjectValue::Object(kind.construct_from(fields, metadata.clone()))
        }
    }
}

/// Convert a materialized tree back to plain JSON
pub fn flatten(value: &ObjectValue) -> Value {
    value.to_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> ConvertOptions {
        ConvertOptions {
            api_key: Some("sk-test".to_string()),
            api_version: Some("2023-05-15".to_string()),
            organization: Some("org-default".to_string()),
            engine: Some("davinci".to_string()),
            plain_old_data: false,
        }
    }

    fn structured(value: Value) -> ObjectValue {
        convert_to_object(value, &options()).into_structured().unwrap()
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            json!(null),
            json!(42),
            json!("text"),
            json!([]),
            json!({}),
            json!([1, "two", null, {"a": [true, {"b": 2.5}]}]),
            json!({
                "object": "list",
                "data": [
                    {"object": "model", "id": "davinci", "permission": [{"object": "model_permission"}]},
                    {"object": "file", "id": "file-1", "bytes": 140}
                ],
                "meta": {"nested": {"deeper": [null, []]}}
            }),
        ];
        for sample in samples {
            assert_eq!(flatten(&structured(sample.clone())), sample);
        }
    }

    #[test]
    fn test_registered_kind_selected() {
        let value = structured(json!({"object": "engine", "id": "ada", "ready": true}));
        let obj = value.as_object().unwrap();
        assert_eq!(obj.kind(), ObjectKind::Engine);
        assert_eq!(obj.id(), Some("ada"));
        assert_eq!(obj.get_bool("ready"), Some(true));
    }

    #[test]
    fn test_unregistered_kind_degrades_to_generic() {
        let value = structured(json!({"object": "x", "id": "1"}));
        assert_eq!(value.as_object().unwrap().kind(), ObjectKind::Generic);
    }

    #[test]
    fn test_non_string_discriminator_is_generic() {
        let value = structured(json!({"object": 7}));
        let obj = value.as_object().unwrap();
        assert_eq!(obj.kind(), ObjectKind::Generic);
        assert_eq!(obj.get_i64("object"), Some(7));
    }

    #[test]
    fn test_raw_response_metadata_hoisted() {
        let raw = RawServiceResponse {
            data: json!({"object": "list", "items": [1, 2]}),
            organization: Some("org1".to_string()),
            response_ms: Some(42),
            request_id: None,
        };
        let result = convert_to_object(raw, &options());
        let obj = result.as_object().unwrap();
        assert_eq!(obj.organization(), Some("org1"));
        assert_eq!(obj.response_ms(), Some(42));
        assert_eq!(obj.api_key(), Some("sk-test"));
        assert_eq!(obj.engine(), Some("davinci"));
        assert_eq!(result.flatten(), json!({"object": "list", "items": [1, 2]}));
    }

    #[test]
    fn test_raw_response_organization_overrides_even_when_absent() {
        let raw = RawServiceResponse {
            data: json!({"id": "x"}),
            ..RawServiceResponse::default()
        };
        let result = convert_to_object(raw, &options());
        assert_eq!(result.as_object().unwrap().organization(), None);
    }

    #[test]
    fn test_plain_mode_returns_value_unchanged() {
        let value = json!({"object": "model", "id": "m"});
        let result = convert_to_object(value.clone(), &options().plain());
        assert_eq!(result, Materialized::Plain(value));
    }

    #[test]
    fn test_plain_mode_unwraps_raw_response() {
        let raw = RawServiceResponse {
            data: json!([1, 2, 3]),
            organization: Some("org1".to_string()),
            response_ms: Some(5),
            request_id: None,
        };
        let result = convert_to_object(raw, &options().plain());
        assert_eq!(result, Materialized::Plain(json!([1, 2, 3])));
    }

    #[test]
    fn test_structured_input_returned_unchanged() {
        let original = structured(json!({"object": "model", "id": "m"}));
        let result = convert_to_object(original.clone(), &ConvertOptions::default());
        assert_eq!(result, Materialized::Structured(original));
    }

    #[test]
    fn test_null_passes_through_at_any_depth() {
        assert_eq!(structured(json!(null)), ObjectValue::Null);
        let value = structured(json!({"a": null, "b": [null, {"c": null}]}));
        let obj = value.as_object().unwrap();
        assert!(obj.get("a").unwrap().is_null());
        let b = obj.get_array("b").unwrap();
        assert!(b[0].is_null());
        assert!(b[1].as_object().unwrap().get("c").unwrap().is_null());
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(structured(json!([])), ObjectValue::Array(vec![]));
        let value = structured(json!({}));
        let obj = value.as_object().unwrap();
        assert_eq!(obj.kind(), ObjectKind::Generic);
        assert!(obj.is_empty());
        assert_eq!(flatten(&value), json!({}));
    }

    #[test]
    fn test_list_elements_keep_engine_and_order() {
        let value = structured(json!([{"object": "model", "id": "a"}, 3, {"id": "b"}]));
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        let first = items[0].as_object().unwrap();
        assert_eq!(first.kind(), ObjectKind::Model);
        assert_eq!(first.engine(), Some("davinci"));
        assert_eq!(first.organization(), Some("org-default"));
        assert_eq!(items[1].as_i64(), Some(3));
        assert_eq!(items[2].as_object().unwrap().id(), Some("b"));
    }

    #[test]
    fn test_nested_objects_are_structured() {
        let raw = RawServiceResponse {
            data: json!({
                "object": "list",
                "data": [{"object": "fine-tune", "id": "ft-1", "hyperparams": {"n_epochs": 4}}]
            }),
            organization: Some("org1".to_string()),
            response_ms: Some(9),
            request_id: None,
        };
        let result = convert_to_object(raw, &options());
        let list = result.as_object().unwrap();
        let job = list.get_array("data").unwrap()[0].as_object().unwrap();
        assert_eq!(job.kind(), ObjectKind::FineTune);
        assert_eq!(job.organization(), Some("org1"));
        assert_eq!(job.api_key(), Some("sk-test"));
        assert_eq!(job.response_ms(), None);
        assert_eq!(job.engine(), None);
        let hyperparams = job.get_object("hyperparams").unwrap();
        assert_eq!(hyperparams.get_i64("n_epochs"), Some(4));
    }

    #[test]
    fn test_field_order_preserved() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let obj = structured(value.clone());
        let keys: Vec<_> = obj.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        let flattened = flatten(&obj);
        let flattened_keys: Vec<_> = flattened.as_object().unwrap().keys().cloned().collect();
        assert_eq!(flattened_keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_options_from_config() {
        let config = ClientConfig {
            api_version: Some("2024-02-01".to_string()),
            organization: Some("org-cfg".to_string()),
            ..ClientConfig::default()
        };
        let opts = ConvertOptions::from_config(&config, Some("sk-1".to_string())).with_engine("gpt");
        let obj = convert_to_object(json!({"id": "x"}), &opts);
        let obj = obj.as_object().unwrap();
        assert_eq!(obj.api_version(), Some("2024-02-01"));
        assert_eq!(obj.organization(), Some("org-cfg"));
        assert_eq!(obj.engine(), Some("gpt"));
    }
}

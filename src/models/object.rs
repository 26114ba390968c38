//! Structured response objects
//!
//! A [`StructuredResponse`] owns an ordered field map plus metadata about the
//! request that produced it. The metadata is kept out of the field map, so it
//! never shows up when the object is flattened or serialized.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// Concrete object type selected by the `"object"` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Generic,
    Engine,
    Completion,
    File,
    FineTune,
    Model,
    Deployment,
}

impl ObjectKind {
    /// Discriminator this kind is registered under, `None` for the fallback
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            ObjectKind::Generic => None,
            ObjectKind::Engine => Some("engine"),
            ObjectKind::Completion => Some("experimental.completion"),
            ObjectKind::File => Some("file"),
            ObjectKind::FineTune => Some("fine-tune"),
            ObjectKind::Model => Some("model"),
            ObjectKind::Deployment => Some("deployment"),
        }
    }

    /// Every kind that has a discriminator
    pub const REGISTERED: [ObjectKind; 6] = [
        ObjectKind::Engine,
        ObjectKind::Completion,
        ObjectKind::File,
        ObjectKind::FineTune,
        ObjectKind::Model,
        ObjectKind::Deployment,
    ];

    /// Build an instance of this kind from its fields and metadata
    pub fn construct_from(
        self,
        fields: IndexMap<String, ObjectValue>,
        metadata: ResponseMetadata,
    ) -> StructuredResponse {
        StructuredResponse {
            kind: self,
            fields,
            metadata,
        }
    }
}

/// Out-of-band data about the request that produced an object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub organization: Option<String>,
    pub response_ms: Option<u64>,
    pub engine: Option<String>,
}

/// A node in a materialized response tree
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ObjectValue>),
    Object(StructuredResponse),
}

impl ObjectValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ObjectValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ObjectValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ObjectValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ObjectValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ObjectValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ObjectValue]> {
        match self {
            ObjectValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&StructuredResponse> {
        match self {
            ObjectValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Plain JSON form of this node, without metadata
    pub fn to_value(&self) -> Value {
        match self {
            ObjectValue::Null => Value::Null,
            ObjectValue::Bool(b) => Value::Bool(*b),
            ObjectValue::Number(n) => Value::Number(n.clone()),
            ObjectValue::String(s) => Value::String(s.clone()),
            ObjectValue::Array(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            ObjectValue::Object(obj) => obj.to_value(),
        }
    }
}

impl From<StructuredResponse> for ObjectValue {
    fn from(obj: StructuredResponse) -> Self {
        ObjectValue::Object(obj)
    }
}

impl From<&str> for ObjectValue {
    fn from(s: &str) -> Self {
        ObjectValue::String(s.to_string())
    }
}

impl From<String> for ObjectValue {
    fn from(s: String) -> Self {
        ObjectValue::String(s)
    }
}

impl From<bool> for ObjectValue {
    fn from(b: bool) -> Self {
        ObjectValue::Bool(b)
    }
}

impl From<i64> for ObjectValue {
    fn from(n: i64) -> Self {
        ObjectValue::Number(n.into())
    }
}

impl Serialize for ObjectValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ObjectValue::Null => serializer.serialize_unit(),
            ObjectValue::Bool(b) => serializer.serialize_bool(*b),
            ObjectValue::Number(n) => n.serialize(serializer),
            ObjectValue::String(s) => serializer.serialize_str(s),
            ObjectValue::Array(items) => items.serialize(serializer),
            ObjectValue::Object(obj) => obj.serialize(serializer),
        }
    }
}

/// A response object with named fields and request metadata
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredResponse {
    kind: ObjectKind,
    fields: IndexMap<String, ObjectValue>,
    metadata: ResponseMetadata,
}

impl StructuredResponse {
    /// Empty object of the generic kind
    pub fn new() -> Self {
        ObjectKind::Generic.construct_from(IndexMap::new(), ResponseMetadata::default())
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }

    pub fn api_key(&self) -> Option<&str> {
        self.metadata.api_key.as_deref()
    }

    pub fn api_version(&self) -> Option<&str> {
        self.metadata.api_version.as_deref()
    }

    pub fn organization(&self) -> Option<&str> {
        self.metadata.organization.as_deref()
    }

    pub fn response_ms(&self) -> Option<u64> {
        self.metadata.response_ms
    }

    pub fn engine(&self) -> Option<&str> {
        self.metadata.engine.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&ObjectValue> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ObjectValue> {
        self.fields.get_mut(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ObjectValue::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ObjectValue::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ObjectValue::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ObjectValue::as_bool)
    }

    pub fn get_object(&self, key: &str) -> Option<&StructuredResponse> {
        self.get(key).and_then(ObjectValue::as_object)
    }

    pub fn get_array(&self, key: &str) -> Option<&[ObjectValue]> {
        self.get(key).and_then(ObjectValue::as_array)
    }

    /// The `id` field
    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    /// The `object` discriminator field
    pub fn object(&self) -> Option<&str> {
        self.get_str("object")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ObjectValue>) -> Option<ObjectValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a field, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<ObjectValue> {
        self.fields.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Plain JSON map of the fields, recursively, without metadata
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl Default for StructuredResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for StructuredResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Pretty JSON with sorted keys
impl fmt::Display for StructuredResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered =
            serde_json::to_string_pretty(&sort_keys(self.to_value())).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

//! Dynamic manifest values
//!
//! Manifests are decoded into an untyped [`Document`] so that unknown fields
//! survive until the schema checker sees them. Only the few fields the
//! validator reads (`slug`, `stage_order`) are pulled out with typed accessors.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

/// A decoded manifest: string keys to dynamic values
pub type Document = BTreeMap<String, Value>;

/// Tagged-union value for decoded YAML
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Document),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Document> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this value is a mapping
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Short type name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

/// Error converting YAML into a [`Value`]
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("unsupported mapping key of type {0}")]
    UnsupportedKey(&'static str),

    #[error("duplicate mapping key '{0}'")]
    DuplicateKey(String),
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = ConversionError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    // u64 beyond i64::MAX and real numbers
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_yaml::Value::Mapping(map) => Value::Mapping(mapping_to_document(map)?),
            // Tags carry no meaning for manifests; keep the tagged value
            serde_yaml::Value::Tagged(tagged) => {
                let tagged = *tagged;
                Value::try_from(tagged.value)?
            }
        })
    }
}

/// Convert a YAML mapping, stringifying scalar keys
pub fn mapping_to_document(map: serde_yaml::Mapping) -> Result<Document, ConversionError> {
    let mut doc = Document::new();
    for (key, value) in map {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Null => "null".to_string(),
            other => {
                let kind = Value::try_from(other)?.kind();
                return Err(ConversionError::UnsupportedKey(kind));
            }
        };
        let value = Value::try_from(value)?;
        // `1` and `"1"` both become the key "1"
        if doc.contains_key(&key) {
            return Err(ConversionError::DuplicateKey(key));
        }
        doc.insert(key, value);
    }
    Ok(doc)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

//! Transport value algebra
//!
//! Values are the transport-neutral form of a single property. They carry no
//! kind information; the codec interprets them against a known [`PropertyKind`].
//!
//! [`PropertyKind`]: crate::PropertyKind

use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A transport value as it arrives from or leaves for a remote caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/None value
    Null,
    /// Boolean value
    Bool(bool),
    /// Any JSON number
    Number(f64),
    /// String value
    String(String),
    /// Named fields, ordered by name
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as map
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get a field from a map value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    /// Short name of the value's shape, used in error messages
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Map(_) => "map",
        }
    }

    /// Convert into a `serde_json::Value` for embedding in responses
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Map(m) => serde_json::Value::Object(
                m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = CodecError;

    /// Arrays have no transport form. The failure is reported without a
    /// property kind, callers attach their own context.
    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => {
                    return Err(CodecError::MalformedValue {
                        kind: None,
                        reason: format!("number {} is not representable", n),
                    })
                }
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(_) => {
                return Err(CodecError::MalformedValue {
                    kind: None,
                    reason: "arrays are not a transport value".to_string(),
                })
            }
            serde_json::Value::Object(map) => {
                let mut fields = BTreeMap::new();
                for (key, value) in map {
                    fields.insert(key, Value::try_from(value)?);
                }
                Self::Map(fields)
            }
        })
    }
}

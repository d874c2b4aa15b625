//! Dynamic value model for call arguments.
//!
//! Workflow and activity arguments cross the interceptor chain as an ordered
//! list of [`Value`]s. The model keeps the distinctions the wire cares about:
//! tuples are not lists, model instances carry their schema, and anything the
//! runtime cannot describe structurally is an [`Value::Opaque`] object.

use bytes::Bytes;
use indexmap::IndexMap;

use crate::schema::ModelValue;

/// Insertion-ordered string-keyed map.
pub type Map = IndexMap<String, Value>;

/// A single argument value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Raw binary buffer.
    Bytes(Bytes),
    /// Variable-length ordered sequence.
    List(Vec<Value>),
    /// Fixed-length positional sequence.
    Tuple(Vec<Value>),
    Map(Map),
    /// Instance of a named record with a declared schema.
    Model(ModelValue),
    /// A type used as a value, named by its fully qualified name.
    Type(String),
    /// Any other object, named by its type.
    Opaque(String),
}

/// Concrete kind of a value, used to decide list homogeneity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    List,
    Tuple,
    Map,
    Model(String),
    Type,
    Opaque(String),
}

impl Value {
    /// Build a map value from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The concrete kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::Map(_) => ValueKind::Map,
            Value::Model(m) => ValueKind::Model(m.schema().name().to_string()),
            Value::Type(_) => ValueKind::Type,
            Value::Opaque(name) => ValueKind::Opaque(name.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl From<ModelValue> for Value {
    fn from(v: ModelValue) -> Self {
        Value::Model(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// JSON documents map onto the plain subset of the model: arrays become
/// lists and objects become maps. Integers outside the `i64` range become
/// floats and may lose precision.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Map(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_builder_preserves_order() {
        let value = Value::map([("b", Value::from(1)), ("a", Value::from(2))]);
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_kind_distinguishes_int_and_float() {
        assert_ne!(Value::from(1).kind(), Value::from(1.0).kind());
        assert_eq!(Value::from("a").kind(), Value::from("b").kind());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".to_string()));
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"a": [1, "x", null], "b": 1.5, "c": true}));
        let map = value.as_map().unwrap();
        assert_eq!(
            map["a"],
            Value::List(vec![Value::Int(1), Value::from("x"), Value::Null])
        );
        assert_eq!(map["b"], Value::Float(1.5));
        assert_eq!(map["c"], Value::Bool(true));
    }

    #[test]
    fn test_from_json_large_unsigned_becomes_float() {
        assert_eq!(Value::from(json!(i64::MAX)), Value::Int(i64::MAX));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn test_accessors() {
        let mut value = Value::map([("k", Value::from("v"))]);
        assert!(value.as_str().is_none());
        value
            .as_map_mut()
            .unwrap()
            .insert("n".to_string(), Value::Null);
        assert_eq!(value.as_map().unwrap().len(), 2);
        assert!(value.as_map().unwrap()["n"].is_null());
    }
}

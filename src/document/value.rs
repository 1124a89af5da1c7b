//! Runtime document values
//!
//! A runtime document is a keyed value tree in which codec-governed fields
//! hold rich values instead of their wire encodings. The `Absent` variant is
//! the explicit value-absent marker: a key bound to `Absent` means "remove /
//! never write this key", which is distinct from the key being missing and
//! distinct from an explicit `Null`. The storage boundary rejects the marker,
//! so every encode path strips it.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// A value in a runtime document.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    /// Explicit value-absent marker. Stripped at the wire boundary.
    Absent,
    /// Explicit null. Preserved at the wire boundary.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Rich date value. Wire encoding is a millisecond timestamp.
    DateTime(DateTime<Utc>),
    /// Branded reference to a document in a named collection.
    DocRef { collection: String, key: String },
    Array(Vec<RuntimeValue>),
    Object(BTreeMap<String, RuntimeValue>),
}

impl RuntimeValue {
    /// Converts a wire value into its canonical runtime form.
    ///
    /// This is the schema-less conversion: plain JSON maps 1:1, integral
    /// numbers become `Int`, everything else `Float`. Rich variants are never
    /// produced here; only codecs introduce them.
    pub fn from_wire(wire: &Value) -> RuntimeValue {
        match wire {
            Value::Null => RuntimeValue::Null,
            Value::Bool(b) => RuntimeValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RuntimeValue::Int(i)
                } else {
                    RuntimeValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => RuntimeValue::String(s.clone()),
            Value::Array(items) => {
                RuntimeValue::Array(items.iter().map(RuntimeValue::from_wire).collect())
            }
            Value::Object(map) => RuntimeValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), RuntimeValue::from_wire(v)))
                    .collect(),
            ),
        }
    }

    /// Converts this value into its canonical wire form.
    ///
    /// Used for schema-less passthrough (fields no schema governs). Rich
    /// variants use their documented canonical encodings: `DateTime` becomes
    /// a millisecond timestamp, `DocRef` becomes `"<collection>:<key>"`.
    /// Object keys bound to `Absent` are stripped; a bare `Absent` (or an
    /// `Absent` array element) canonicalizes to null.
    pub fn to_wire(&self) -> Value {
        match self {
            RuntimeValue::Absent => Value::Null,
            RuntimeValue::Null => Value::Null,
            RuntimeValue::Bool(b) => Value::Bool(*b),
            RuntimeValue::Int(i) => Value::from(*i),
            RuntimeValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            RuntimeValue::String(s) => Value::String(s.clone()),
            RuntimeValue::DateTime(dt) => Value::from(dt.timestamp_millis()),
            RuntimeValue::DocRef { collection, key } => {
                Value::String(format!("{}:{}", collection, key))
            }
            RuntimeValue::Array(items) => {
                Value::Array(items.iter().map(RuntimeValue::to_wire).collect())
            }
            RuntimeValue::Object(map) => Value::Object(
                map.iter()
                    .filter(|(_, v)| !v.is_absent())
                    .map(|(k, v)| (k.clone(), v.to_wire()))
                    .collect(),
            ),
        }
    }

    /// Builds a `DateTime` value from a millisecond timestamp, if in range.
    pub fn from_timestamp_millis(ms: i64) -> Option<RuntimeValue> {
        Utc.timestamp_millis_opt(ms)
            .single()
            .map(RuntimeValue::DateTime)
    }

    /// Returns the kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuntimeValue::Absent => "absent",
            RuntimeValue::Null => "null",
            RuntimeValue::Bool(_) => "bool",
            RuntimeValue::Int(_) => "int",
            RuntimeValue::Float(_) => "float",
            RuntimeValue::String(_) => "string",
            RuntimeValue::DateTime(_) => "datetime",
            RuntimeValue::DocRef { .. } => "doc-ref",
            RuntimeValue::Array(_) => "array",
            RuntimeValue::Object(_) => "object",
        }
    }

    /// Returns true for the explicit value-absent marker.
    pub fn is_absent(&self) -> bool {
        matches!(self, RuntimeValue::Absent)
    }

    /// Returns true for an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, RuntimeValue::Null)
    }

    /// Returns the object map if this is an object.
    pub fn as_object(&self) -> Option<&BTreeMap<String, RuntimeValue>> {
        match self {
            RuntimeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the string content if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuntimeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a field on an object value.
    pub fn get(&self, key: &str) -> Option<&RuntimeValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Builds an object value from key/value pairs.
    pub fn object<I, K>(fields: I) -> RuntimeValue
    where
        I: IntoIterator<Item = (K, RuntimeValue)>,
        K: Into<String>,
    {
        RuntimeValue::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a string value.
    pub fn string(s: impl Into<String>) -> RuntimeValue {
        RuntimeValue::String(s.into())
    }
}

impl From<&str> for RuntimeValue {
    fn from(s: &str) -> Self {
        RuntimeValue::String(s.to_string())
    }
}

impl From<i64> for RuntimeValue {
    fn from(i: i64) -> Self {
        RuntimeValue::Int(i)
    }
}

impl From<bool> for RuntimeValue {
    fn from(b: bool) -> Self {
        RuntimeValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json_round_trips() {
        let wire = json!({
            "name": "Alice",
            "age": 30,
            "score": 99.5,
            "tags": ["a", "b"],
            "active": true,
            "note": null
        });

        let runtime = RuntimeValue::from_wire(&wire);
        assert_eq!(runtime.to_wire(), wire);
    }

    #[test]
    fn test_integral_numbers_become_int() {
        let runtime = RuntimeValue::from_wire(&json!(42));
        assert_eq!(runtime, RuntimeValue::Int(42));

        let runtime = RuntimeValue::from_wire(&json!(42.5));
        assert_eq!(runtime, RuntimeValue::Float(42.5));
    }

    #[test]
    fn test_absent_keys_stripped_on_canonical_conversion() {
        let runtime = RuntimeValue::object([
            ("name", RuntimeValue::string("A")),
            ("nickname", RuntimeValue::Absent),
        ]);

        let wire = runtime.to_wire();
        let obj = wire.as_object().unwrap();
        assert!(obj.contains_key("name"));
        assert!(!obj.contains_key("nickname"));
    }

    #[test]
    fn test_null_keys_preserved() {
        let runtime = RuntimeValue::object([("note", RuntimeValue::Null)]);
        assert_eq!(runtime.to_wire(), json!({ "note": null }));
    }

    #[test]
    fn test_datetime_canonical_encoding() {
        let runtime = RuntimeValue::from_timestamp_millis(1_700_000_000_000).unwrap();
        assert_eq!(runtime.to_wire(), json!(1_700_000_000_000_i64));
    }

    #[test]
    fn test_doc_ref_canonical_encoding() {
        let runtime = RuntimeValue::DocRef {
            collection: "users".into(),
            key: "u1".into(),
        };
        assert_eq!(runtime.to_wire(), json!("users:u1"));
    }
}

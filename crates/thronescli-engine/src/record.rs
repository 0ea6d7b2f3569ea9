use serde_json::{Map, Value};
use std::fmt;

/// One dataset entry: a flat, immutable mapping from key to scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Parse a single JSON object. Anything else is rejected.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    /// Raw lookup. JSON `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self::from_json(value).unwrap_or_else(|| Self::new(Map::new()))
    }
}

/// Signal that a field does not apply to a record.
///
/// This is not a user facing error: the filter treats it as a failed test,
/// the renderer omits the field and the counter skips the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField;

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field does not apply to this record")
    }
}

impl std::error::Error for MissingField {}

/// A value fetched from a record by a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Bool(bool),
    /// Independent sub-values of a delimited or derived field
    Parts(Vec<String>),
    /// Named sub-flags of a composite field, in declaration order
    Flags(Vec<(&'static str, bool)>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

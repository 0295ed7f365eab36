//! Canonical JSON serialization for digest computation.
//!
//! Every byte sequence that gets hashed is produced here, in RFC 8785 (JCS)
//! form via `serde_jcs`: object keys sorted at every depth, compact
//! separators, and ECMAScript number formatting. Structurally equal values
//! serialize identically no matter how their maps were built, and equal
//! numbers serialize identically no matter their form (`1` and `1.0`, `0.0`
//! and `-0.0`).

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Bytes produced by canonical serialization.
///
/// The inner buffer is private: the only ways to get one are the
/// constructors below.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Unsupported`] if the value has no JSON
    /// representation (for example a map with non-string keys).
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self, EncodingError> {
        let value =
            serde_json::to_value(value).map_err(|e| EncodingError::Unsupported(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Canonicalize a JSON value.
    pub fn from_value(value: &Value) -> Result<Self, EncodingError> {
        jcs(value)
    }

    /// Canonicalize a JSON object without wrapping it in a `Value`.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, EncodingError> {
        jcs(map)
    }

    /// Canonical form of a JSON string.
    ///
    /// RFC 8785 escapes strings exactly as `serde_json`'s compact writer
    /// does, so this cannot fail and matches `from_value(&Value::String(..))`.
    pub(crate) fn from_str_value(text: &str) -> Self {
        Self(Value::from(text).to_string().into_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The canonical form as text. Always valid UTF-8.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn jcs<T: Serialize + ?Sized>(value: &T) -> Result<CanonicalBytes, EncodingError> {
    serde_jcs::to_vec(value)
        .map(CanonicalBytes)
        .map_err(|e| EncodingError::Unsupported(e.to_string()))
}

/// Convert a floating-point measurement into payload data.
///
/// JSON has no representation for NaN or the infinities, and `serde_json`
/// would silently turn them into `null`. Scores go through here instead so
/// the failure surfaces at the call site.
pub fn finite(value: f64) -> Result<Value, EncodingError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or(EncodingError::NonFiniteNumber(value))
}

/// Require a payload to be a mapping of string keys to values.
pub fn into_mapping(value: Value) -> Result<Map<String, Value>, EncodingError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(EncodingError::NotAMapping(kind_name(&other))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Errors from canonical serialization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("value cannot be canonically serialized: {0}")]
    Unsupported(String),

    #[error("non-finite number {0} cannot be canonically serialized")]
    NonFiniteNumber(f64),

    #[error("payload must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

//! Read surface shared by stores and views
//!
//! Absence is not an error: a missing key yields the zero value of the
//! requested type. A present value of the wrong kind is an error, except for
//! the object and array accessors, which re-parse the value's text and fall
//! back to an empty container.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, map};

use crate::{Error, Result};

/// Query and typed-accessor surface over a JSON document.
///
/// Implementors only provide [`document`](ConfigRead::document).
pub trait ConfigRead {
    /// The backing JSON object.
    fn document(&self) -> &Map<String, Value>;

    /// Raw value stored under `key`.
    fn get(&self, key: &str) -> Option<&Value> {
        self.document().get(key)
    }

    fn get_as_i64(&self, key: &str) -> Result<i64> {
        integer(key, self.get(key), "i64")
    }

    fn get_as_i32(&self, key: &str) -> Result<i32> {
        integer(key, self.get(key), "i32")
    }

    fn get_as_i16(&self, key: &str) -> Result<i16> {
        integer(key, self.get(key), "i16")
    }

    fn get_as_i8(&self, key: &str) -> Result<i8> {
        integer(key, self.get(key), "i8")
    }

    fn get_as_f64(&self, key: &str) -> Result<f64> {
        match self.get(key) {
            None => Ok(0.0),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| Error::type_mismatch(key, "f64", value)),
        }
    }

    fn get_as_f32(&self, key: &str) -> Result<f32> {
        match self.get(key) {
            None => Ok(0.0),
            Some(value) => value
                .as_f64()
                .map(|n| n as f32)
                .filter(|n| n.is_finite())
                .ok_or_else(|| Error::type_mismatch(key, "f32", value)),
        }
    }

    fn get_as_bool(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| Error::type_mismatch(key, "boolean", value)),
        }
    }

    fn get_as_string(&self, key: &str) -> Result<String> {
        match self.get(key) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(value) => Err(Error::type_mismatch(key, "string", value)),
        }
    }

    /// Nested object under `key`; never fails.
    fn get_as_object(&self, key: &str) -> Map<String, Value> {
        match self.get(key) {
            None => Map::new(),
            Some(Value::Object(object)) => object.clone(),
            Some(other) => match reparse(other) {
                Some(Value::Object(object)) => object,
                _ => {
                    tracing::debug!(
                        key,
                        found = crate::error::kind_of(other),
                        "substituting empty object"
                    );
                    Map::new()
                }
            },
        }
    }

    /// Nested array under `key`; never fails.
    fn get_as_array(&self, key: &str) -> Vec<Value> {
        match self.get(key) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => match reparse(other) {
                Some(Value::Array(items)) => items,
                _ => {
                    tracing::debug!(
                        key,
                        found = crate::error::kind_of(other),
                        "substituting empty array"
                    );
                    Vec::new()
                }
            },
        }
    }

    /// Deserialize the value under `key`, `None` when absent.
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|_| Error::type_mismatch(key, std::any::type_name::<T>(), value)),
        }
    }

    fn contains_key(&self, key: &str) -> bool {
        self.document().contains_key(key)
    }

    fn contains_value(&self, value: &Value) -> bool {
        self.document().values().any(|v| v == value)
    }

    /// Whether `item` is a key, or equals a stored string value.
    fn contains(&self, item: &str) -> bool {
        self.contains_key(item) || self.document().values().any(|v| v.as_str() == Some(item))
    }

    fn keys(&self) -> map::Keys<'_> {
        self.document().keys()
    }

    fn values(&self) -> map::Values<'_> {
        self.document().values()
    }

    fn entries(&self) -> map::Iter<'_> {
        self.document().iter()
    }

    fn len(&self) -> usize {
        self.document().len()
    }

    fn is_empty(&self) -> bool {
        self.document().is_empty()
    }

    /// Owned copy of the document.
    fn jsonify(&self) -> Map<String, Value> {
        self.document().clone()
    }

    /// Compact JSON text of the document.
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.document())?)
    }

    /// Indented JSON text of the document.
    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.document())?)
    }
}

fn integer<T: TryFrom<i64> + Default>(
    key: &str,
    value: Option<&Value>,
    expected: &str,
) -> Result<T> {
    let Some(value) = value else {
        return Ok(T::default());
    };
    value
        .as_i64()
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| Error::type_mismatch(key, expected, value))
}

/// Parse the textual form of a value: string contents for strings, JSON
/// text for everything else.
fn reparse(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(text) => serde_json::from_str(text).ok(),
        other => serde_json::from_str(&other.to_string()).ok(),
    }
}

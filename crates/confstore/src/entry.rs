//! The unit of mutation requests

use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// An immutable `(name, value)` pair handed to the mutation methods.
///
/// Entries are never stored as such; the target document receives the name
/// as a key and the value under it. An entry whose value is the empty string
/// is a *sentinel*: [`ConfigStore::remove`](crate::ConfigStore::remove)
/// treats it as "remove by key, whatever the current value".
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    name: String,
    value: Value,
}

impl ConfigEntry {
    /// Create an entry from anything `serde_json` converts directly.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create an entry from an arbitrary serializable value.
    pub fn serialize<T: Serialize + ?Sized>(name: impl Into<String>, value: &T) -> Result<Self> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|e| Error::Serialize {
            key: name.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { name, value })
    }

    /// The sentinel entry for `name`: matches any value on removal.
    pub fn key(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the value is the empty-string sentinel.
    pub fn is_sentinel(&self) -> bool {
        matches!(&self.value, Value::String(s) if s.is_empty())
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for ConfigEntry {
    fn from((name, value): (K, V)) -> Self {
        Self::new(name, value)
    }
}

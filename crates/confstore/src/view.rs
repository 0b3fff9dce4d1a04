//! Scoped views nested under a store or another view

use std::fmt;

use serde_json::{Map, Value};

use crate::{ConfigEntry, ConfigRead, ConfigStore, Configurable};

/// A named object living inside a parent's document.
///
/// A view owns its own document and only borrows its parent, so the parent
/// chain always ends at a [`ConfigStore`] that outlives every view built on
/// it, and a cycle cannot be constructed. Views never touch the filesystem:
/// reach the root through [`Configurable::as_configuration`] to persist, and
/// put the view's document back into its parent yourself, for example with
/// [`into_entry`](Self::into_entry).
#[derive(Debug)]
pub struct Subconfiguration<'a> {
    parent: &'a dyn Configurable,
    document: Map<String, Value>,
}

impl<'a> Subconfiguration<'a> {
    /// An empty view under `parent`.
    pub fn new(parent: &'a dyn Configurable) -> Self {
        Self::with_document(parent, Map::new())
    }

    pub fn with_document(parent: &'a dyn Configurable, document: Map<String, Value>) -> Self {
        Self { parent, document }
    }

    pub fn parent(&self) -> &'a dyn Configurable {
        self.parent
    }

    /// Insert or overwrite `name`.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.document.insert(name.into(), value.into());
        self
    }

    pub fn add_entry(&mut self, entry: ConfigEntry) -> &mut Self {
        let (name, value) = entry.into_parts();
        self.document.insert(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.document.shift_remove(name);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.document.clear();
        self
    }

    /// A view over the object stored under `key` in this view.
    pub fn subconfiguration(&self, key: &str) -> Subconfiguration<'_> {
        Subconfiguration::with_document(self, self.get_as_object(key))
    }

    pub fn into_document(self) -> Map<String, Value> {
        self.document
    }

    /// This view's document as an entry named `name`, ready to be added to
    /// the parent.
    pub fn into_entry(self, name: impl Into<String>) -> ConfigEntry {
        ConfigEntry::new(name, Value::Object(self.document))
    }
}

impl ConfigRead for Subconfiguration<'_> {
    fn document(&self) -> &Map<String, Value> {
        &self.document
    }
}

impl Configurable for Subconfiguration<'_> {
    fn as_configuration(&self) -> &ConfigStore {
        self.parent.as_configuration()
    }

    fn as_subconfiguration(&self) -> Option<&Subconfiguration<'_>> {
        Some(self)
    }
}

impl fmt::Display for Subconfiguration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.document).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

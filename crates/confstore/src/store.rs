//! File-backed configuration store
//!
//! A [`ConfigStore`] owns one JSON object and one file,
//! `<directory>/<name>.json`. Mutations only touch memory; the file changes
//! when [`save`](ConfigStore::save) or [`raw_save`](ConfigStore::raw_save)
//! runs (directly or through an `..._and_save` method), and memory picks up
//! the file only through [`sync`](ConfigStore::sync).

use std::fmt;

use confstore_fs::{NormalizedPath, WriteOptions, io};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{ConfigEntry, ConfigRead, Configurable, Error, Result, Subconfiguration};

/// Extension of every config file.
pub const FILE_EXTENSION: &str = "json";

/// Persistence settings for a [`ConfigStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Flush written files to stable storage before replacing the old file.
    pub enable_fsync: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { enable_fsync: true }
    }
}

impl From<StoreOptions> for WriteOptions {
    fn from(options: StoreOptions) -> Self {
        WriteOptions {
            enable_fsync: options.enable_fsync,
        }
    }
}

/// A named JSON document mirrored to `<directory>/<name>.json`.
///
/// # Example
///
/// ```no_run
/// use confstore::{ConfigEntry, ConfigRead, ConfigStore};
///
/// # fn main() -> confstore::Result<()> {
/// let mut store = ConfigStore::load("settings", "/tmp/myapp")?;
/// store
///     .add(ConfigEntry::new("theme", "dark"))
///     .add_if_absent(ConfigEntry::new("volume", 7));
/// store.save()?;
///
/// assert_eq!(store.get_as_string("theme")?, "dark");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigStore {
    name: String,
    directory: NormalizedPath,
    document: Map<String, Value>,
    options: StoreOptions,
}

impl ConfigStore {
    /// Load the store `name` from `directory`, creating an empty file when
    /// none exists yet.
    ///
    /// # Errors
    ///
    /// [`Error::Fs`] when the file cannot be read or created, and
    /// [`Error::Parse`] when it does not contain a JSON object.
    pub fn load(name: impl Into<String>, directory: impl Into<NormalizedPath>) -> Result<Self> {
        Self::load_with_options(name, directory, StoreOptions::default())
    }

    /// Like [`load`](Self::load) with explicit persistence settings.
    pub fn load_with_options(
        name: impl Into<String>,
        directory: impl Into<NormalizedPath>,
        options: StoreOptions,
    ) -> Result<Self> {
        let mut store = Self {
            name: name.into(),
            directory: directory.into(),
            document: Map::new(),
            options,
        };

        let path = store.config_file();
        if path.exists() {
            store.document = read_document(&path)?;
            debug!(path = %path, entries = store.document.len(), "loaded config");
        } else {
            store.save()?;
            debug!(path = %path, "created empty config");
        }

        Ok(store)
    }

    /// A new store with the same identity and an independent copy of every
    /// entry. Writes the file if it does not exist yet.
    pub fn try_clone(&self) -> Result<Self> {
        let clone = Self {
            name: self.name.clone(),
            directory: self.directory.clone(),
            document: self.document.clone(),
            options: self.options,
        };

        if !clone.config_file().exists() {
            clone.save()?;
        }

        Ok(clone)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &NormalizedPath {
        &self.directory
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Path of the backing file.
    pub fn config_file(&self) -> NormalizedPath {
        self.directory.join(&format!("{}.{}", self.name, FILE_EXTENSION))
    }

    /// Point future persistence at another directory. Nothing is read or
    /// written until the next save or sync.
    pub fn set_directory(&mut self, directory: impl Into<NormalizedPath>) -> &mut Self {
        self.directory = directory.into();
        self
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Overwrite the file with the indented document.
    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.document)?;
        self.write(&text)
    }

    /// Overwrite the file with the compact document.
    pub fn raw_save(&self) -> Result<()> {
        let text = serde_json::to_string(&self.document)?;
        self.write(&text)
    }

    fn write(&self, text: &str) -> Result<()> {
        let path = self.config_file();
        io::write_atomic(&path, text.as_bytes(), self.options.into())?;
        debug!(path = %path, entries = self.document.len(), "saved config");
        Ok(())
    }

    /// Whether the file holds a document structurally equal to memory.
    pub fn is_synced(&self) -> Result<bool> {
        let on_disk = read_document(&self.config_file())?;
        Ok(on_disk == self.document)
    }

    /// Merge the file into memory when the two differ.
    ///
    /// Entries from disk overwrite entries with the same key; keys only
    /// present in memory are kept. Returns whether anything was merged.
    pub fn try_sync(&mut self) -> Result<bool> {
        let on_disk = read_document(&self.config_file())?;
        if on_disk == self.document {
            return Ok(false);
        }

        let merged = on_disk.len();
        for (key, value) in on_disk {
            self.document.insert(key, value);
        }
        debug!(name = %self.name, merged, "synced config from disk");
        Ok(true)
    }

    /// [`try_sync`](Self::try_sync), logging and discarding any failure.
    ///
    /// On failure the in-memory document is left as it was.
    pub fn sync(&mut self) -> &mut Self {
        if let Err(error) = self.try_sync() {
            warn!(
                name = %self.name,
                path = %self.config_file(),
                %error,
                "config sync failed, keeping in-memory state"
            );
        }
        self
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert or overwrite.
    pub fn add(&mut self, entry: ConfigEntry) -> &mut Self {
        let (name, value) = entry.into_parts();
        self.document.insert(name, value);
        self
    }

    /// Upsert every pair, in the source's iteration order.
    pub fn add_all<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.document.insert(key.into(), value.into());
        }
        self
    }

    /// Upsert every entry of another store or view.
    pub fn add_all_from(&mut self, source: &impl ConfigRead) -> &mut Self {
        self.add_all(source.jsonify())
    }

    /// Insert only when the key is missing.
    pub fn add_if_absent(&mut self, entry: ConfigEntry) -> &mut Self {
        let (name, value) = entry.into_parts();
        self.document.entry(name).or_insert(value);
        self
    }

    /// Overwrite only when the key is present.
    pub fn replace(&mut self, entry: ConfigEntry) -> &mut Self {
        let (name, value) = entry.into_parts();
        if let Some(slot) = self.document.get_mut(&name) {
            *slot = value;
        }
        self
    }

    /// Replace every value with `f(key, value)`, keeping order.
    pub fn replace_all<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&str, &Value) -> Value,
    {
        for (key, value) in self.document.iter_mut() {
            let next = f(key, value);
            *value = next;
        }
        self
    }

    /// Remove `entry.name()`.
    ///
    /// A sentinel entry (empty-string value) removes the key whatever it
    /// holds; any other entry removes it only when the stored value equals
    /// `entry.value()`.
    pub fn remove(&mut self, entry: ConfigEntry) -> &mut Self {
        let sentinel = entry.is_sentinel();
        let (name, value) = entry.into_parts();
        if sentinel || self.document.get(&name) == Some(&value) {
            self.document.shift_remove(&name);
        }
        self
    }

    /// Remove `key` unconditionally.
    pub fn remove_key(&mut self, key: &str) -> &mut Self {
        self.remove(ConfigEntry::key(key))
    }

    /// Set `key` to `f(key, current)`; `None` removes it.
    pub fn compute<F>(&mut self, key: &str, f: F) -> &mut Self
    where
        F: FnOnce(&str, Option<&Value>) -> Option<Value>,
    {
        match f(key, self.document.get(key)) {
            Some(value) => {
                self.document.insert(key.to_string(), value);
            }
            None => {
                self.document.shift_remove(key);
            }
        }
        self
    }

    /// Fill a missing `key` with `f(key)`; `None` leaves it missing.
    pub fn compute_if_absent<F>(&mut self, key: &str, f: F) -> &mut Self
    where
        F: FnOnce(&str) -> Option<Value>,
    {
        if !self.document.contains_key(key) {
            if let Some(value) = f(key) {
                self.document.insert(key.to_string(), value);
            }
        }
        self
    }

    /// Update a present `key` with `f(key, current)`; `None` removes it.
    pub fn compute_if_present<F>(&mut self, key: &str, f: F) -> &mut Self
    where
        F: FnOnce(&str, &Value) -> Option<Value>,
    {
        if let Some(current) = self.document.get(key) {
            match f(key, current) {
                Some(value) => {
                    self.document.insert(key.to_string(), value);
                }
                None => {
                    self.document.shift_remove(key);
                }
            }
        }
        self
    }

    /// Insert `value` when `key` is missing, otherwise store
    /// `f(existing, value)`; `None` removes the key.
    pub fn merge<F>(&mut self, key: &str, value: impl Into<Value>, f: F) -> &mut Self
    where
        F: FnOnce(&Value, Value) -> Option<Value>,
    {
        let value = value.into();
        let merged = match self.document.get(key) {
            None => Some(value),
            Some(existing) => f(existing, value),
        };
        match merged {
            Some(merged) => {
                self.document.insert(key.to_string(), merged);
            }
            None => {
                self.document.shift_remove(key);
            }
        }
        self
    }

    /// Visit every entry in order.
    pub fn for_each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&str, &Value),
    {
        for (key, value) in &self.document {
            f(key, value);
        }
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.document.clear();
        self
    }

    /// Clear the whole document when `key` is missing.
    pub fn clear_if_absent(&mut self, key: &str) -> &mut Self {
        if !self.document.contains_key(key) {
            self.document.clear();
        }
        self
    }

    /// Clear the whole document when `key` is present.
    pub fn clear_if_present(&mut self, key: &str) -> &mut Self {
        if self.document.contains_key(key) {
            self.document.clear();
        }
        self
    }

    pub fn clear_and_add(&mut self, entry: ConfigEntry) -> &mut Self {
        self.clear().add(entry)
    }

    pub fn clear_and_add_all<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.clear().add_all(entries)
    }

    // ------------------------------------------------------------------
    // Mutate, then save
    // ------------------------------------------------------------------

    pub fn add_and_save(&mut self, entry: ConfigEntry) -> Result<&mut Self> {
        self.add(entry).save_chained()
    }

    pub fn add_all_and_save<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.add_all(entries).save_chained()
    }

    pub fn add_all_from_and_save(&mut self, source: &impl ConfigRead) -> Result<&mut Self> {
        self.add_all_from(source).save_chained()
    }

    pub fn add_if_absent_and_save(&mut self, entry: ConfigEntry) -> Result<&mut Self> {
        self.add_if_absent(entry).save_chained()
    }

    pub fn replace_and_save(&mut self, entry: ConfigEntry) -> Result<&mut Self> {
        self.replace(entry).save_chained()
    }

    pub fn replace_all_and_save<F>(&mut self, f: F) -> Result<&mut Self>
    where
        F: FnMut(&str, &Value) -> Value,
    {
        self.replace_all(f).save_chained()
    }

    pub fn remove_and_save(&mut self, entry: ConfigEntry) -> Result<&mut Self> {
        self.remove(entry).save_chained()
    }

    pub fn remove_key_and_save(&mut self, key: &str) -> Result<&mut Self> {
        self.remove_key(key).save_chained()
    }

    pub fn merge_and_save<F>(
        &mut self,
        key: &str,
        value: impl Into<Value>,
        f: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&Value, Value) -> Option<Value>,
    {
        self.merge(key, value, f).save_chained()
    }

    pub fn clear_and_save(&mut self) -> Result<&mut Self> {
        self.clear().save_chained()
    }

    /// Saves whether or not the document was cleared.
    pub fn clear_if_absent_and_save(&mut self, key: &str) -> Result<&mut Self> {
        self.clear_if_absent(key).save_chained()
    }

    /// Saves whether or not the document was cleared.
    pub fn clear_if_present_and_save(&mut self, key: &str) -> Result<&mut Self> {
        self.clear_if_present(key).save_chained()
    }

    fn save_chained(&mut self) -> Result<&mut Self> {
        self.save()?;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Sync, then mutate
    // ------------------------------------------------------------------

    pub fn sync_and_add(&mut self, entry: ConfigEntry) -> &mut Self {
        self.sync().add(entry)
    }

    pub fn sync_and_add_all<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.sync().add_all(entries)
    }

    pub fn sync_and_add_all_from(&mut self, source: &impl ConfigRead) -> &mut Self {
        self.sync().add_all_from(source)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// A view over the object stored under `key` (empty when absent).
    ///
    /// The view works on its own copy; write it back with
    /// [`Subconfiguration::into_entry`] and [`add`](Self::add).
    pub fn subconfiguration(&self, key: &str) -> Subconfiguration<'_> {
        Subconfiguration::with_document(self, self.get_as_object(key))
    }
}

impl ConfigRead for ConfigStore {
    fn document(&self) -> &Map<String, Value> {
        &self.document
    }
}

impl Configurable for ConfigStore {
    fn as_configuration(&self) -> &ConfigStore {
        self
    }

    fn as_subconfiguration(&self) -> Option<&Subconfiguration<'_>> {
        None
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.document).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn read_document(path: &NormalizedPath) -> Result<Map<String, Value>> {
    let text = io::read_text(path)?;
    let value: Value = serde_json::from_str(&text).map_err(|e| Error::Parse {
        path: path.to_native(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(document) => Ok(document),
        other => Err(Error::Parse {
            path: path.to_native(),
            message: format!(
                "expected a JSON object at the root, found {}",
                crate::error::kind_of(&other)
            ),
        }),
    }
}

//! [`ConfigDir`] scratch directory for store tests.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary directory holding `<name>.json` config files, with helpers
/// to seed and inspect them behind a store's back.
///
/// # Example
///
/// ```rust,no_run
/// use confstore_test_utils::ConfigDir;
/// use serde_json::json;
///
/// let dir = ConfigDir::new();
/// dir.seed("settings", &json!({"theme": "dark"}));
/// assert_eq!(dir.read_json("settings"), json!({"theme": "dark"}));
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("ConfigDir::new: failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the config file for `name`.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{name}.json"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.file(name).is_file()
    }

    /// Write `value` as the pretty-printed config file for `name`.
    pub fn seed(&self, name: &str, value: &Value) {
        let text = serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| panic!("ConfigDir::seed: failed to serialize {name}: {e}"));
        self.seed_raw(name, &text);
    }

    /// Write arbitrary text, valid JSON or not, as the config file for `name`.
    pub fn seed_raw(&self, name: &str, text: &str) {
        fs::write(self.file(name), text)
            .unwrap_or_else(|e| panic!("ConfigDir::seed_raw: failed to write {name}: {e}"));
    }

    pub fn read_raw(&self, name: &str) -> String {
        fs::read_to_string(self.file(name))
            .unwrap_or_else(|e| panic!("ConfigDir::read_raw: failed to read {name}: {e}"))
    }

    /// Parse the config file for `name`.
    pub fn read_json(&self, name: &str) -> Value {
        let text = self.read_raw(name);
        serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("ConfigDir::read_json: {name} is not JSON: {e}"))
    }

    /// # Panics
    /// Panics if the file is missing or not valid JSON equal to `expected`.
    pub fn assert_json(&self, name: &str, expected: &Value) {
        let actual = self.read_json(name);
        assert_eq!(&actual, expected, "config file {name} does not match");
    }
}

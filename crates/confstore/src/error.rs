//! Error types for confstore

use std::path::PathBuf;

/// Result type for confstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in confstore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The config file exists but does not hold a JSON object
    #[error("Failed to parse config at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A typed accessor hit a stored value of another kind
    #[error("Type mismatch for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: String,
        found: &'static str,
    },

    /// A value could not be turned into JSON
    #[error("Failed to serialize value for entry '{key}': {message}")]
    Serialize { key: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from confstore-fs
    #[error(transparent)]
    Fs(#[from] confstore_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn type_mismatch(
        key: &str,
        expected: impl Into<String>,
        found: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected: expected.into(),
            found: kind_of(found),
        }
    }
}

/// Name of the JSON kind of a value, as used in error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

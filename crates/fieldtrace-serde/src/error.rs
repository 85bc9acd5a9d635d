//! Error types for the serde-backed containers.

use thiserror::Error;

/// Result type alias for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;

/// Errors raised by the JSON and YAML containers.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// No value is stored under the key.
    #[error("key not found: \"{0}\"")]
    KeyNotFound(String),

    /// The value under the key is not the kind of value required.
    #[error("expected {expected} at \"{key}\", found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The document root is not a keyed value.
    #[error("expected a keyed document, found {0}")]
    NotKeyed(&'static str),

    /// JSON encoding or decoding error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding error.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContainerError {
    pub(crate) fn mismatch(key: &str, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected,
            found,
        }
    }
}

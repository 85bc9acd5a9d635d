//! Rendering and date-decoding configuration.

use serde::{Deserialize, Serialize};

/// How a [`crate::DecodeError`] chain is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// One level of indentation.
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Links followed before the chain is cut short.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_max_depth() -> usize {
    128
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            max_depth: default_max_depth(),
        }
    }
}

impl RenderConfig {
    /// Use `indent` as the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Follow at most `max_depth` links.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// How string properties are parsed into dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "format", rename_all = "snake_case")]
pub enum DateStrategy {
    /// RFC 3339 timestamps with an offset (`2021-04-01T10:00:00Z`).
    #[default]
    Rfc3339,
    /// A `chrono` format for a date-time without offset, taken as UTC.
    DateTime(String),
    /// A `chrono` format for a calendar date, taken as midnight UTC.
    Date(String),
}

//! Trace configuration loaded from YAML.

use crate::error::Result;
use fieldtrace_core::{DateStrategy, RenderConfig, Renderer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Configuration file, typically `fieldtrace.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// How failures are rendered.
    #[serde(default)]
    pub render: RenderConfig,

    /// How date properties are parsed.
    #[serde(default)]
    pub dates: DateStrategy,
}

impl TraceConfig {
    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    /// Returns `ContainerError::Yaml` if the text is not a valid configuration.
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;

        debug!(path = %path.display(), "Loaded trace config");

        Ok(config)
    }

    /// A renderer using this configuration.
    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.render.clone())
    }
}

//! Serde-backed keyed containers for fieldtrace.
//!
//! Decodes JSON objects and YAML mappings property by property:
//! - `JsonDecoder` / `JsonEncoder`: containers over `serde_json` objects
//! - `YamlDecoder` / `YamlEncoder`: containers over `serde_yaml` mappings
//! - `from_json`, `from_yaml_str`, `to_json`, ...: document entry points
//! - `TraceConfig`: rendering and date settings loaded from YAML, applied by
//!   the `*_with` entry points

pub mod codec;
pub mod config;
pub mod error;
pub mod json;
pub mod yaml;

pub use codec::{
    from_json, from_json_str, from_json_str_with, from_json_with, from_yaml, from_yaml_str,
    from_yaml_str_with, from_yaml_with, to_json, to_yaml,
};
pub use config::TraceConfig;
pub use error::{ContainerError, Result};
pub use json::{JsonDecoder, JsonEncoder};
pub use yaml::{YamlDecoder, YamlEncoder};

//! Document-level decode and encode entry points.

use crate::config::TraceConfig;
use crate::error::{ContainerError, Result};
use crate::json::{JsonDecoder, JsonEncoder};
use crate::yaml::{YamlDecoder, YamlEncoder};
use fieldtrace_core::{DecodeError, FieldDecode, FieldEncode, TypeName, decode_type_with};
use serde_json::Map;
use serde_yaml::Mapping;
use tracing::debug;

/// A document that could not be opened as a keyed container is a failure
/// of the type being decoded.
fn open_failed<T>(cause: ContainerError) -> DecodeError {
    let owner = TypeName::of::<T>();
    debug!(owner = %owner, "Document is not keyed");
    DecodeError::type_failed(owner, DecodeError::from_cause(cause))
}

/// Decode `T` from a JSON value.
///
/// # Errors
/// Returns a [`DecodeError`] chain describing the failing property.
pub fn from_json<T: FieldDecode>(value: &serde_json::Value) -> fieldtrace_core::Result<T> {
    from_json_with(value, &TraceConfig::default())
}

/// Decode `T` from a JSON value, reading dates as `config` says.
///
/// # Errors
/// Returns a [`DecodeError`] chain describing the failing property.
pub fn from_json_with<T: FieldDecode>(
    value: &serde_json::Value,
    config: &TraceConfig,
) -> fieldtrace_core::Result<T> {
    let decoder = JsonDecoder::new(value).map_err(open_failed::<T>)?;
    decode_type_with(&decoder, &config.dates)
}

/// Parse JSON text and decode `T` from it.
///
/// # Errors
/// Returns [`DecodeError::Wrapped`] for malformed JSON, otherwise as [`from_json`].
pub fn from_json_str<T: FieldDecode>(input: &str) -> fieldtrace_core::Result<T> {
    from_json_str_with(input, &TraceConfig::default())
}

/// Parse JSON text and decode `T` from it with `config`.
///
/// # Errors
/// Returns [`DecodeError::Wrapped`] for malformed JSON, otherwise as [`from_json_with`].
pub fn from_json_str_with<T: FieldDecode>(
    input: &str,
    config: &TraceConfig,
) -> fieldtrace_core::Result<T> {
    let value: serde_json::Value = serde_json::from_str(input).map_err(DecodeError::from_cause)?;
    from_json_with(&value, config)
}

/// Decode `T` from a YAML value.
///
/// # Errors
/// Returns a [`DecodeError`] chain describing the failing property.
pub fn from_yaml<T: FieldDecode>(value: &serde_yaml::Value) -> fieldtrace_core::Result<T> {
    from_yaml_with(value, &TraceConfig::default())
}

/// Decode `T` from a YAML value, reading dates as `config` says.
///
/// # Errors
/// Returns a [`DecodeError`] chain describing the failing property.
pub fn from_yaml_with<T: FieldDecode>(
    value: &serde_yaml::Value,
    config: &TraceConfig,
) -> fieldtrace_core::Result<T> {
    let decoder = YamlDecoder::new(value).map_err(open_failed::<T>)?;
    decode_type_with(&decoder, &config.dates)
}

/// Parse YAML text and decode `T` from it.
///
/// # Errors
/// Returns [`DecodeError::Wrapped`] for malformed YAML, otherwise as [`from_yaml`].
pub fn from_yaml_str<T: FieldDecode>(input: &str) -> fieldtrace_core::Result<T> {
    from_yaml_str_with(input, &TraceConfig::default())
}

/// Parse YAML text and decode `T` from it with `config`.
///
/// # Errors
/// Returns [`DecodeError::Wrapped`] for malformed YAML, otherwise as [`from_yaml_with`].
pub fn from_yaml_str_with<T: FieldDecode>(
    input: &str,
    config: &TraceConfig,
) -> fieldtrace_core::Result<T> {
    let value: serde_yaml::Value = serde_yaml::from_str(input).map_err(DecodeError::from_cause)?;
    from_yaml_with(&value, config)
}

/// Encode `value` as a JSON object.
///
/// # Errors
/// Returns error if a property cannot be encoded.
pub fn to_json<T: FieldEncode>(value: &T) -> Result<serde_json::Value> {
    let mut object = Map::new();
    value.encode_fields(&mut JsonEncoder::new(&mut object))?;
    Ok(serde_json::Value::Object(object))
}

/// Encode `value` as a YAML mapping.
///
/// # Errors
/// Returns error if a property cannot be encoded.
pub fn to_yaml<T: FieldEncode>(value: &T) -> Result<serde_yaml::Value> {
    let mut mapping = Mapping::new();
    value.encode_fields(&mut YamlEncoder::new(&mut mapping))?;
    Ok(serde_yaml::Value::Mapping(mapping))
}

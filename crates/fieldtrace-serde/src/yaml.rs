//! Keyed containers over YAML mappings.
//!
//! Only string keys are addressable; other mapping keys are skipped by
//! `all_keys`.

use crate::error::{ContainerError, Result};
use fieldtrace_core::{CodingKey, DynamicKey, KeyedDecodingContainer, KeyedEncodingContainer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Reads properties out of a YAML mapping.
#[derive(Debug, Clone, Copy)]
pub struct YamlDecoder<'a> {
    mapping: &'a Mapping,
}

impl<'a> YamlDecoder<'a> {
    /// Open a decoder over `value`, which must be a mapping.
    ///
    /// # Errors
    /// Returns `ContainerError::NotKeyed` for any other YAML value.
    pub fn new(value: &'a Value) -> Result<Self> {
        value
            .as_mapping()
            .map(Self::from_mapping)
            .ok_or_else(|| ContainerError::NotKeyed(kind(value)))
    }

    /// Open a decoder over a mapping.
    #[must_use]
    pub const fn from_mapping(mapping: &'a Mapping) -> Self {
        Self { mapping }
    }

    fn get(&self, key: &DynamicKey) -> Result<&'a Value> {
        self.mapping
            .get(key.string_value())
            .ok_or_else(|| ContainerError::KeyNotFound(key.to_string()))
    }
}

impl KeyedDecodingContainer for YamlDecoder<'_> {
    type Key = DynamicKey;
    type Error = ContainerError;

    fn contains(&self, key: &DynamicKey) -> bool {
        self.mapping.contains_key(key.string_value())
    }

    fn all_keys(&self) -> Vec<DynamicKey> {
        self.mapping
            .keys()
            .filter_map(Value::as_str)
            .map(DynamicKey::from_string)
            .collect()
    }

    fn decode<T: DeserializeOwned>(&self, key: &DynamicKey) -> Result<T> {
        Ok(serde_yaml::from_value(self.get(key)?.clone())?)
    }

    fn decode_if_present<T: DeserializeOwned>(&self, key: &DynamicKey) -> Result<Option<T>> {
        match self.mapping.get(key.string_value()) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_yaml::from_value(value.clone())?)),
        }
    }

    fn nested_container(&self, key: &DynamicKey) -> Result<Self> {
        let value = self.get(key)?;
        value
            .as_mapping()
            .map(Self::from_mapping)
            .ok_or_else(|| ContainerError::mismatch(key.string_value(), "mapping", kind(value)))
    }
}

/// Writes properties into a YAML mapping.
#[derive(Debug)]
pub struct YamlEncoder<'a> {
    mapping: &'a mut Mapping,
}

impl<'a> YamlEncoder<'a> {
    /// Open an encoder over a mapping.
    pub const fn new(mapping: &'a mut Mapping) -> Self {
        Self { mapping }
    }
}

impl KeyedEncodingContainer for YamlEncoder<'_> {
    type Key = DynamicKey;
    type Error = ContainerError;
    type Nested<'n>
        = YamlEncoder<'n>
    where
        Self: 'n;

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T, key: &DynamicKey) -> Result<()> {
        self.mapping
            .insert(Value::String(key.to_string()), serde_yaml::to_value(value)?);
        Ok(())
    }

    fn nested_container(&mut self, key: &DynamicKey) -> Result<YamlEncoder<'_>> {
        let slot = self
            .mapping
            .entry(Value::String(key.to_string()))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        let found = kind(slot);
        slot.as_mapping_mut()
            .map(YamlEncoder::new)
            .ok_or_else(|| ContainerError::mismatch(key.string_value(), "mapping", found))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtrace_core::{DynamicDecoding, DynamicEncoding};

    fn parse(input: &str) -> Value {
        serde_yaml::from_str(input).unwrap()
    }

    #[test]
    fn test_decode_fields() {
        let value = parse("name: alice\nage: 31\nnickname: ~\n1: numeric\naddress:\n  city: Oslo\n");
        let decoder = YamlDecoder::new(&value).unwrap();

        assert_eq!(decoder.decode_field::<String>("name").unwrap(), "alice");
        assert_eq!(decoder.decode_field::<u8>("age").unwrap(), 31);
        assert_eq!(decoder.decode_field_if_present::<String>("nickname").unwrap(), None);
        assert_eq!(
            decoder
                .nested_field_container("address")
                .and_then(|address| address.decode_field::<String>("city"))
                .unwrap(),
            "Oslo"
        );
        assert_eq!(decoder.all_keys().len(), 4);
    }

    #[test]
    fn test_decode_errors() {
        let value = parse("name: alice\n");
        let decoder = YamlDecoder::new(&value).unwrap();

        assert!(matches!(
            decoder.decode_field::<u8>("missing"),
            Err(ContainerError::KeyNotFound(key)) if key == "missing"
        ));
        assert!(matches!(
            decoder.decode_field::<u8>("name"),
            Err(ContainerError::Yaml(_))
        ));
        assert!(matches!(
            decoder.nested_field_container("name"),
            Err(ContainerError::TypeMismatch { expected: "mapping", found: "string", .. })
        ));
        assert!(matches!(
            YamlDecoder::new(&parse("- a\n- b\n")),
            Err(ContainerError::NotKeyed("sequence"))
        ));
    }

    #[test]
    fn test_encode_fields() {
        let mut mapping = Mapping::new();
        let mut encoder = YamlEncoder::new(&mut mapping);

        encoder.encode_field("alice", "name").unwrap();
        encoder
            .nested_field_container("address")
            .and_then(|mut address| address.encode_field("Oslo", "city"))
            .unwrap();

        assert_eq!(Value::Mapping(mapping), parse("name: alice\naddress:\n  city: Oslo\n"));
    }
}

//! Keyed containers over JSON objects.

use crate::error::{ContainerError, Result};
use fieldtrace_core::{CodingKey, DynamicKey, KeyedDecodingContainer, KeyedEncodingContainer};
use serde::de::{Deserialize, DeserializeOwned};
use serde::Serialize;
use serde_json::{Map, Value};

/// Reads properties out of a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct JsonDecoder<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> JsonDecoder<'a> {
    /// Open a decoder over `value`, which must be an object.
    ///
    /// # Errors
    /// Returns `ContainerError::NotKeyed` for any other JSON value.
    pub fn new(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(Self::from_map)
            .ok_or_else(|| ContainerError::NotKeyed(kind(value)))
    }

    /// Open a decoder over an object map.
    #[must_use]
    pub const fn from_map(object: &'a Map<String, Value>) -> Self {
        Self { object }
    }

    fn get(&self, key: &DynamicKey) -> Result<&'a Value> {
        self.object
            .get(key.string_value())
            .ok_or_else(|| ContainerError::KeyNotFound(key.to_string()))
    }
}

impl KeyedDecodingContainer for JsonDecoder<'_> {
    type Key = DynamicKey;
    type Error = ContainerError;

    fn contains(&self, key: &DynamicKey) -> bool {
        self.object.contains_key(key.string_value())
    }

    fn all_keys(&self) -> Vec<DynamicKey> {
        self.object.keys().map(DynamicKey::from_string).collect()
    }

    fn decode<T: DeserializeOwned>(&self, key: &DynamicKey) -> Result<T> {
        Ok(<T as Deserialize>::deserialize(self.get(key)?)?)
    }

    fn decode_if_present<T: DeserializeOwned>(&self, key: &DynamicKey) -> Result<Option<T>> {
        match self.object.get(key.string_value()) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(<T as Deserialize>::deserialize(value)?)),
        }
    }

    fn nested_container(&self, key: &DynamicKey) -> Result<Self> {
        let value = self.get(key)?;
        value
            .as_object()
            .map(Self::from_map)
            .ok_or_else(|| ContainerError::mismatch(key.string_value(), "object", kind(value)))
    }
}

/// Writes properties into a JSON object.
#[derive(Debug)]
pub struct JsonEncoder<'a> {
    object: &'a mut Map<String, Value>,
}

impl<'a> JsonEncoder<'a> {
    /// Open an encoder over an object map.
    pub const fn new(object: &'a mut Map<String, Value>) -> Self {
        Self { object }
    }
}

impl KeyedEncodingContainer for JsonEncoder<'_> {
    type Key = DynamicKey;
    type Error = ContainerError;
    type Nested<'n>
        = JsonEncoder<'n>
    where
        Self: 'n;

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T, key: &DynamicKey) -> Result<()> {
        self.object
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    fn nested_container(&mut self, key: &DynamicKey) -> Result<JsonEncoder<'_>> {
        let slot = self
            .object
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        let found = kind(slot);
        slot.as_object_mut()
            .map(JsonEncoder::new)
            .ok_or_else(|| ContainerError::mismatch(key.string_value(), "object", found))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtrace_core::{DecodeField, DynamicDecoding, DynamicEncoding, EncodeField};
    use serde_json::json;

    #[test]
    fn test_new_requires_object() {
        assert!(JsonDecoder::new(&json!({})).is_ok());
        assert!(matches!(
            JsonDecoder::new(&json!([1, 2])),
            Err(ContainerError::NotKeyed("array"))
        ));
    }

    #[test]
    fn test_decode_fields() {
        let value = json!({"name": "alice", "tags": ["a", "b"], "nickname": null});
        let decoder = JsonDecoder::new(&value).unwrap();

        assert_eq!(decoder.decode_field::<String>("name").unwrap(), "alice");
        assert_eq!(decoder.decode_field::<Vec<String>>("tags").unwrap(), vec!["a", "b"]);
        assert_eq!(decoder.decode_field_if_present::<String>("nickname").unwrap(), None);
        assert_eq!(String::decode_if_present_from(&decoder, "name").unwrap(), Some("alice".to_string()));

        let mut keys: Vec<String> = decoder.all_keys().iter().map(ToString::to_string).collect();
        keys.sort();
        assert_eq!(keys, vec!["name", "nickname", "tags"]);
    }

    #[test]
    fn test_decode_errors() {
        let value = json!({"age": "old", "address": 3});
        let decoder = JsonDecoder::new(&value).unwrap();

        let error = decoder.decode_field::<u8>("missing").unwrap_err();
        assert_eq!(error.to_string(), "key not found: \"missing\"");

        let error = decoder.decode_field::<u8>("age").unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid type: string \"old\", expected u8"
        );

        let error = decoder.nested_field_container("address").unwrap_err();
        assert_eq!(error.to_string(), "expected object at \"address\", found number");
    }

    #[test]
    fn test_encode_fields() {
        let mut map = Map::new();
        let mut encoder = JsonEncoder::new(&mut map);

        encoder.encode_field("alice", "name").unwrap();
        Some(3_u8).encode_if_present_to(&mut encoder, "count").unwrap();
        None::<u8>.encode_if_present_to(&mut encoder, "skipped").unwrap();
        encoder
            .nested_field_container("address")
            .and_then(|mut address| address.encode_field("Oslo", "city"))
            .unwrap();

        assert_eq!(
            Value::Object(map),
            json!({"name": "alice", "count": 3, "address": {"city": "Oslo"}})
        );
    }

    #[test]
    fn test_nested_encoder_keeps_existing_object() {
        let mut map = Map::new();
        map.insert("address".to_string(), json!({"city": "Oslo"}));
        map.insert("name".to_string(), json!("alice"));
        let mut encoder = JsonEncoder::new(&mut map);

        encoder
            .nested_field_container("address")
            .and_then(|mut address| address.encode_field("0150", "zip_code"))
            .unwrap();
        assert!(matches!(
            encoder.nested_field_container("name"),
            Err(ContainerError::TypeMismatch { found: "string", .. })
        ));

        assert_eq!(map["address"], json!({"city": "Oslo", "zip_code": "0150"}));
    }
}

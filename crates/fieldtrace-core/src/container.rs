//! Keyed container capabilities and the string-keyed operations built on them.
//!
//! A decode/encode engine exposes its structured values through
//! [`KeyedDecodingContainer`] and [`KeyedEncodingContainer`]. Any container
//! keyed by [`DynamicKey`] gets the field-name operations of
//! [`DynamicDecoding`] and [`DynamicEncoding`] for free, so helpers can be
//! written once against a plain `&str` field name.
//!
//! None of these operations catch or classify errors. Whatever the container
//! raises is returned unchanged.

use crate::key::{CodingKey, DynamicKey};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read access to a structured value addressed by keys.
pub trait KeyedDecodingContainer: Sized {
    /// Key type the container is addressed by.
    type Key: CodingKey;
    /// Failure raised by the underlying engine.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the container holds a value for `key`.
    fn contains(&self, key: &Self::Key) -> bool;

    /// Every key present in the container.
    fn all_keys(&self) -> Vec<Self::Key>;

    /// Decode the value stored at `key`.
    ///
    /// # Errors
    /// Fails if the key is missing or the value does not decode as `T`.
    fn decode<T: DeserializeOwned>(&self, key: &Self::Key) -> Result<T, Self::Error>;

    /// Decode the value stored at `key`, returning `None` when it is missing or null.
    ///
    /// # Errors
    /// Fails if a value is present but does not decode as `T`.
    fn decode_if_present<T: DeserializeOwned>(
        &self,
        key: &Self::Key,
    ) -> Result<Option<T>, Self::Error>;

    /// Container scoped at the nested structured value stored at `key`.
    ///
    /// # Errors
    /// Fails if the key is missing or its value is not keyed.
    fn nested_container(&self, key: &Self::Key) -> Result<Self, Self::Error>;
}

/// Write access to a structured value addressed by keys.
pub trait KeyedEncodingContainer {
    /// Key type the container is addressed by.
    type Key: CodingKey;
    /// Failure raised by the underlying engine.
    type Error: std::error::Error + Send + Sync + 'static;
    /// Container returned for nested values; borrows its parent mutably.
    type Nested<'n>: KeyedEncodingContainer<Key = Self::Key, Error = Self::Error>
    where
        Self: 'n;

    /// Encode `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    /// Fails if `value` cannot be encoded.
    fn encode<T: Serialize + ?Sized>(&mut self, value: &T, key: &Self::Key)
    -> Result<(), Self::Error>;

    /// Encode `value` at `key` when it is `Some`; leave the key untouched otherwise.
    ///
    /// # Errors
    /// Fails if `value` cannot be encoded.
    fn encode_if_present<T: Serialize>(
        &mut self,
        value: Option<&T>,
        key: &Self::Key,
    ) -> Result<(), Self::Error> {
        match value {
            Some(value) => self.encode(value, key),
            None => Ok(()),
        }
    }

    /// Container scoped at the nested structured value at `key`, created if absent.
    ///
    /// # Errors
    /// Fails if a non-keyed value already occupies `key`.
    fn nested_container(&mut self, key: &Self::Key) -> Result<Self::Nested<'_>, Self::Error>;
}

/// Field-name access for any container keyed by [`DynamicKey`].
pub trait DynamicDecoding: KeyedDecodingContainer<Key = DynamicKey> {
    /// Whether the container holds `field_name`.
    fn contains_field(&self, field_name: &str) -> bool {
        self.contains(&DynamicKey::from_string(field_name))
    }

    /// Decode `field_name` as `T`.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn decode_field<T: DeserializeOwned>(&self, field_name: &str) -> Result<T, Self::Error> {
        self.decode(&DynamicKey::from_string(field_name))
    }

    /// Decode `field_name` as `T` if it is present and not null.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn decode_field_if_present<T: DeserializeOwned>(
        &self,
        field_name: &str,
    ) -> Result<Option<T>, Self::Error> {
        self.decode_if_present(&DynamicKey::from_string(field_name))
    }

    /// Nested container at `field_name`, itself string-addressable.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn nested_field_container(&self, field_name: &str) -> Result<Self, Self::Error> {
        self.nested_container(&DynamicKey::from_string(field_name))
    }
}

impl<C> DynamicDecoding for C where C: KeyedDecodingContainer<Key = DynamicKey> {}

/// Field-name access for any encoding container keyed by [`DynamicKey`].
pub trait DynamicEncoding: KeyedEncodingContainer<Key = DynamicKey> {
    /// Encode `value` under `field_name`.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn encode_field<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        field_name: &str,
    ) -> Result<(), Self::Error> {
        self.encode(value, &DynamicKey::from_string(field_name))
    }

    /// Encode `value` under `field_name` when it is `Some`.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn encode_field_if_present<T: Serialize>(
        &mut self,
        value: Option<&T>,
        field_name: &str,
    ) -> Result<(), Self::Error> {
        self.encode_if_present(value, &DynamicKey::from_string(field_name))
    }

    /// Nested encoding container at `field_name`.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn nested_field_container(
        &mut self,
        field_name: &str,
    ) -> Result<Self::Nested<'_>, Self::Error> {
        self.nested_container(&DynamicKey::from_string(field_name))
    }
}

impl<C> DynamicEncoding for C where C: KeyedEncodingContainer<Key = DynamicKey> {}

/// Decode any deserializable type straight out of a string-keyed container.
pub trait DecodeField: DeserializeOwned {
    /// Decode `field_name` from `container` if present.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn decode_if_present_from<C: DynamicDecoding>(
        container: &C,
        field_name: &str,
    ) -> Result<Option<Self>, C::Error> {
        container.decode_field_if_present(field_name)
    }
}

impl<T: DeserializeOwned> DecodeField for T {}

/// Encode an optional value into a string-keyed container.
pub trait EncodeField {
    /// Encode the contained value under `field_name`; absent values write nothing.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn encode_if_present_to<C: DynamicEncoding>(
        &self,
        container: &mut C,
        field_name: &str,
    ) -> Result<(), C::Error>;
}

impl<T: Serialize> EncodeField for Option<T> {
    fn encode_if_present_to<C: DynamicEncoding>(
        &self,
        container: &mut C,
        field_name: &str,
    ) -> Result<(), C::Error> {
        container.encode_field_if_present(self.as_ref(), field_name)
    }
}

//! Property-level decoding that records where a failure happened.
//!
//! Types describe their properties once in [`FieldDecode::decode_fields`]
//! through a [`TypeDecoder`]. Each property failure is wrapped as
//! [`DecodeError::PropertyDecodeFailed`] and each type failure as
//! [`DecodeError::TypeDecodeFailed`], so the final error carries the full
//! path down to the root cause.

use crate::config::DateStrategy;
use crate::container::{DynamicDecoding, DynamicEncoding};
use crate::error::{DecodeError, OpaqueValue, Result, TypeName};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, trace};

static DEFAULT_DATES: DateStrategy = DateStrategy::Rfc3339;

/// A type decodable property by property from a string-keyed container.
pub trait FieldDecode: Sized {
    /// Decode every property of `Self`.
    ///
    /// # Errors
    /// Returns the first property failure.
    fn decode_fields<C: DynamicDecoding>(fields: &TypeDecoder<'_, C>) -> Result<Self>;
}

/// A type encodable property by property into a string-keyed container.
pub trait FieldEncode {
    /// Encode every property of `self`.
    ///
    /// # Errors
    /// Propagates the container's failure unchanged.
    fn encode_fields<C: DynamicEncoding>(&self, container: &mut C)
    -> std::result::Result<(), C::Error>;
}

/// Decode `T` from `container`, wrapping any failure as a type failure of `T`.
///
/// Date properties are read as RFC 3339.
///
/// # Errors
/// Returns [`DecodeError::TypeDecodeFailed`] around the property failure.
pub fn decode_type<T: FieldDecode, C: DynamicDecoding>(container: &C) -> Result<T> {
    decode_type_with(container, &DEFAULT_DATES)
}

/// Decode `T` from `container`, reading date properties with `dates`.
///
/// Nested types inherit the same strategy.
///
/// # Errors
/// Returns [`DecodeError::TypeDecodeFailed`] around the property failure.
pub fn decode_type_with<T: FieldDecode, C: DynamicDecoding>(
    container: &C,
    dates: &DateStrategy,
) -> Result<T> {
    let owner = TypeName::of::<T>();
    trace!(owner = %owner, ?dates, "Decoding type");

    let fields = TypeDecoder::new(container, owner).with_dates(dates);
    T::decode_fields(&fields).map_err(|inner| {
        debug!(owner = %owner, "Type decode failed");
        DecodeError::type_failed(owner, inner)
    })
}

/// Parse `input` into a UTC date-time using `strategy`.
///
/// # Errors
/// Returns [`DecodeError::DateParseFailed`] holding `input` if it does not match.
pub fn parse_date(input: &str, strategy: &DateStrategy) -> Result<DateTime<Utc>> {
    let parsed = match strategy {
        DateStrategy::Rfc3339 => {
            DateTime::parse_from_rfc3339(input).map(|date| date.with_timezone(&Utc))
        }
        DateStrategy::DateTime(format) => {
            NaiveDateTime::parse_from_str(input, format).map(|date| date.and_utc())
        }
        DateStrategy::Date(format) => NaiveDate::parse_from_str(input, format)
            .map(|date| date.and_time(NaiveTime::MIN).and_utc()),
    };

    parsed.map_err(|_| DecodeError::date_parse_failed(input))
}

/// Format `date` the way [`parse_date`] reads it back with `strategy`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>, strategy: &DateStrategy) -> String {
    match strategy {
        DateStrategy::Rfc3339 => date.to_rfc3339(),
        DateStrategy::DateTime(format) | DateStrategy::Date(format) => {
            date.format(format).to_string()
        }
    }
}

/// Decodes the properties of one owner type.
#[derive(Debug)]
pub struct TypeDecoder<'c, C> {
    container: &'c C,
    owner: TypeName,
    dates: &'c DateStrategy,
}

impl<'c, C: DynamicDecoding> TypeDecoder<'c, C> {
    /// Decode properties of `owner` from `container`.
    pub fn new(container: &'c C, owner: TypeName) -> Self {
        Self {
            container,
            owner,
            dates: &DEFAULT_DATES,
        }
    }

    /// Read date properties with `dates` instead of RFC 3339.
    #[must_use]
    pub const fn with_dates(mut self, dates: &'c DateStrategy) -> Self {
        self.dates = dates;
        self
    }

    /// The strategy [`Self::date_property`] parses with.
    #[must_use]
    pub const fn dates(&self) -> &'c DateStrategy {
        self.dates
    }

    /// The type whose properties are decoded.
    #[must_use]
    pub const fn owner(&self) -> TypeName {
        self.owner
    }

    /// The underlying container.
    #[must_use]
    pub const fn container(&self) -> &'c C {
        self.container
    }

    /// Decode `property`, stored under a key of the same name.
    ///
    /// # Errors
    /// Returns [`DecodeError::PropertyDecodeFailed`] around the container failure.
    pub fn property<T: DeserializeOwned>(&self, property: &str) -> Result<T> {
        self.property_with_key(property, property)
    }

    /// Decode `property`, stored under `key`.
    ///
    /// # Errors
    /// Returns [`DecodeError::PropertyDecodeFailed`] around the container failure.
    pub fn property_with_key<T: DeserializeOwned>(&self, property: &str, key: &str) -> Result<T> {
        self.container
            .decode_field(key)
            .map_err(|cause| self.property_failed(property, key, DecodeError::from_cause(cause)))
    }

    /// Decode `property` from `key` if it is present and not null.
    ///
    /// # Errors
    /// Returns [`DecodeError::PropertyDecodeFailed`] if a present value does not decode.
    pub fn optional_property<T: DeserializeOwned>(
        &self,
        property: &str,
        key: &str,
    ) -> Result<Option<T>> {
        self.container
            .decode_field_if_present(key)
            .map_err(|cause| self.property_failed(property, key, DecodeError::from_cause(cause)))
    }

    /// Decode a date string stored under `key` using the configured strategy.
    ///
    /// # Errors
    /// Returns [`DecodeError::PropertyDecodeFailed`] around either the
    /// container failure or a [`DecodeError::DateParseFailed`].
    pub fn date_property(&self, property: &str, key: &str) -> Result<DateTime<Utc>> {
        self.date_property_with(property, key, self.dates)
    }

    /// Decode a date string stored under `key` using `strategy`, whatever
    /// the configured one is.
    ///
    /// # Errors
    /// Same as [`Self::date_property`].
    pub fn date_property_with(
        &self,
        property: &str,
        key: &str,
        strategy: &DateStrategy,
    ) -> Result<DateTime<Utc>> {
        let input: String = self.property_with_key(property, key)?;
        parse_date(&input, strategy).map_err(|inner| self.property_failed(property, key, inner))
    }

    /// Decode `property` from `key` and reject it unless `is_valid` holds.
    ///
    /// # Errors
    /// Returns [`DecodeError::PropertyDecodeFailed`] if the value does not
    /// decode, or [`DecodeError::ValidationFailed`] if it is rejected.
    pub fn validated_property<T, F>(&self, property: &str, key: &str, is_valid: F) -> Result<T>
    where
        T: DeserializeOwned + Debug + Send + Sync + 'static,
        F: FnOnce(&T) -> bool,
    {
        let value: T = self.property_with_key(property, key)?;
        if is_valid(&value) {
            return Ok(value);
        }

        debug!(owner = %self.owner, property, value = ?value, "Validation failed");
        Err(DecodeError::validation_failed(
            self.owner,
            property,
            OpaqueValue::debug(value),
        ))
    }

    /// Decode the nested type stored under `key`.
    ///
    /// # Errors
    /// Returns [`DecodeError::PropertyDecodeFailed`] around the nested failure.
    pub fn nested_property<T: FieldDecode>(&self, property: &str, key: &str) -> Result<T> {
        let nested = self
            .container
            .nested_field_container(key)
            .map_err(|cause| self.property_failed(property, key, DecodeError::from_cause(cause)))?;

        decode_type_with(&nested, self.dates)
            .map_err(|inner| self.property_failed(property, key, inner))
    }

    fn property_failed(&self, property: &str, key: &str, inner: DecodeError) -> DecodeError {
        debug!(owner = %self.owner, property, key, "Property decode failed");
        DecodeError::property_failed(property, key, self.owner, inner)
    }
}

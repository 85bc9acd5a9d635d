//! String-constructed coding keys.

use std::fmt;

/// The key contract a keyed container is addressed by.
///
/// A key always has a string form. An integer form is optional and only
/// present for keys that index positionally.
pub trait CodingKey: Sized {
    /// The key as a string.
    fn string_value(&self) -> &str;

    /// The key as an integer, if it has one.
    fn int_value(&self) -> Option<i64> {
        None
    }

    /// Build a key from its string form.
    fn from_string_value(value: &str) -> Option<Self>;

    /// Build a key from its integer form.
    fn from_int_value(value: i64) -> Option<Self>;
}

/// A key built on demand from an arbitrary field name.
///
/// Construction never fails, so any field name can address any container
/// keyed by `DynamicKey`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DynamicKey {
    string_value: String,
    int_value: Option<i64>,
}

impl DynamicKey {
    /// Create a key from a field name.
    #[must_use]
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            string_value: value.into(),
            int_value: None,
        }
    }

    /// Create a key from an integer index. The string form is the decimal
    /// rendering of `value`.
    #[must_use]
    pub fn from_int(value: i64) -> Self {
        Self {
            string_value: value.to_string(),
            int_value: Some(value),
        }
    }
}

impl CodingKey for DynamicKey {
    fn string_value(&self) -> &str {
        &self.string_value
    }

    fn int_value(&self) -> Option<i64> {
        self.int_value
    }

    fn from_string_value(value: &str) -> Option<Self> {
        Some(Self::from_string(value))
    }

    fn from_int_value(value: i64) -> Option<Self> {
        Some(Self::from_int(value))
    }
}

impl fmt::Display for DynamicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_value)
    }
}

impl From<&str> for DynamicKey {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}

impl From<String> for DynamicKey {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl From<i64> for DynamicKey {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

//! Error types for fieldtrace-core.

use std::fmt;

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Name of the type that owns a failing property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeName(&'static str);

impl TypeName {
    /// Name of `T`, displayed without module paths (`Vec<Person>`).
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>())
    }

    /// A literal type name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self(name)
    }

    /// The name as recorded, including module paths.
    #[must_use]
    pub const fn full_name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&strip_paths(self.0))
    }
}

/// Drop every `a::b::` prefix, keeping generic punctuation intact.
fn strip_paths(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment_start = 0;
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' | '*' => {
                out.push(c);
                segment_start = out.len();
            }
            _ => out.push(c),
        }
    }

    out
}

/// A decoded value kept only for display.
pub struct OpaqueValue(Box<dyn fmt::Display + Send + Sync>);

impl OpaqueValue {
    /// Hold a value rendered through its `Display` impl.
    pub fn new(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        Self(Box::new(value))
    }

    /// Hold a value rendered through its `Debug` impl.
    pub fn debug(value: impl fmt::Debug + Send + Sync + 'static) -> Self {
        Self(Box::new(DebugDisplay(value)))
    }
}

struct DebugDisplay<T>(T);

impl<T: fmt::Debug> fmt::Display for DebugDisplay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueValue({})", self.0)
    }
}

/// Why a value failed to decode.
///
/// `PropertyDecodeFailed` and `TypeDecodeFailed` add context around an
/// `inner` failure; the other variants are root causes. `Display` renders the
/// whole chain, see [`crate::render`].
#[derive(Debug)]
pub enum DecodeError {
    /// Failure raised by the decode engine itself.
    Wrapped(anyhow::Error),

    /// A string could not be parsed into a date.
    DateParseFailed { input: String },

    /// A validator rejected a value that otherwise decoded.
    ValidationFailed {
        owner_type: TypeName,
        property: String,
        parsed_value: OpaqueValue,
    },

    /// Decoding one property of `owner_type` failed.
    PropertyDecodeFailed {
        property: String,
        key: String,
        owner_type: TypeName,
        inner: Box<DecodeError>,
    },

    /// Decoding `owner_type` as a whole failed.
    TypeDecodeFailed {
        owner_type: TypeName,
        inner: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Coerce an arbitrary failure into a `DecodeError`.
    ///
    /// A `DecodeError` that was converted into `anyhow::Error` is recovered
    /// as is; anything else becomes [`DecodeError::Wrapped`].
    pub fn from_cause(cause: impl Into<anyhow::Error>) -> Self {
        let cause = cause.into();
        if Self::top_level(&cause).is_none() {
            return Self::Wrapped(cause);
        }
        match cause.downcast::<Self>() {
            Ok(error) => error,
            Err(cause) => Self::Wrapped(cause),
        }
    }

    /// The cause itself as a `DecodeError`.
    ///
    /// `anyhow` downcasts also see through `.context(...)`; the context is a
    /// link of its own, so only the outermost error object counts here.
    fn top_level(cause: &anyhow::Error) -> Option<&Self> {
        (**cause).downcast_ref::<Self>()
    }

    /// A date parse failure for `input`.
    pub fn date_parse_failed(input: impl Into<String>) -> Self {
        Self::DateParseFailed {
            input: input.into(),
        }
    }

    /// A validator rejected `parsed_value` for `property` of `owner_type`.
    pub fn validation_failed(
        owner_type: TypeName,
        property: impl Into<String>,
        parsed_value: OpaqueValue,
    ) -> Self {
        Self::ValidationFailed {
            owner_type,
            property: property.into(),
            parsed_value,
        }
    }

    /// Wrap `inner` as the failure of `property`, looked up under `key`.
    pub fn property_failed(
        property: impl Into<String>,
        key: impl Into<String>,
        owner_type: TypeName,
        inner: Self,
    ) -> Self {
        Self::PropertyDecodeFailed {
            property: property.into(),
            key: key.into(),
            owner_type,
            inner: Box::new(inner),
        }
    }

    /// Wrap `inner` as the failure of `owner_type` as a whole.
    pub fn type_failed(owner_type: TypeName, inner: Self) -> Self {
        Self::TypeDecodeFailed {
            owner_type,
            inner: Box::new(inner),
        }
    }

    /// The next link in the chain, if this error adds context to another.
    ///
    /// A `Wrapped` cause that is itself a `DecodeError` counts as a link.
    #[must_use]
    pub fn inner(&self) -> Option<&Self> {
        match self {
            Self::PropertyDecodeFailed { inner, .. } | Self::TypeDecodeFailed { inner, .. } => {
                Some(inner.as_ref())
            }
            Self::Wrapped(cause) => Self::top_level(cause),
            Self::DateParseFailed { .. } | Self::ValidationFailed { .. } => None,
        }
    }

    /// Whether this error ends a chain.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.inner().is_none()
    }

    /// The root cause at the end of the chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Some(inner) = current.inner() {
            current = inner;
        }
        current
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wrapped(cause) => Some(&**cause),
            Self::PropertyDecodeFailed { inner, .. } | Self::TypeDecodeFailed { inner, .. } => {
                Some(inner.as_ref())
            }
            Self::DateParseFailed { .. } | Self::ValidationFailed { .. } => None,
        }
    }
}

/// Equality over what can be compared.
///
/// Opaque payloads are never inspected. `Wrapped` errors are unequal even to
/// themselves, `ValidationFailed` compares the property only,
/// `PropertyDecodeFailed` compares property, owner type and inner error (not
/// the key) and `TypeDecodeFailed` compares the owner type only.
impl PartialEq for DecodeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DateParseFailed { input: a }, Self::DateParseFailed { input: b }) => a == b,
            (
                Self::ValidationFailed { property: a, .. },
                Self::ValidationFailed { property: b, .. },
            ) => a == b,
            (
                Self::PropertyDecodeFailed {
                    property: a_property,
                    owner_type: a_owner,
                    inner: a_inner,
                    ..
                },
                Self::PropertyDecodeFailed {
                    property: b_property,
                    owner_type: b_owner,
                    inner: b_inner,
                    ..
                },
            ) => {
                a_property == b_property
                    && a_owner.to_string() == b_owner.to_string()
                    && a_inner == b_inner
            }
            (
                Self::TypeDecodeFailed { owner_type: a, .. },
                Self::TypeDecodeFailed { owner_type: b, .. },
            ) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

use std::borrow::Cow;
use std::{error, fmt};

// -----------------------------------------------------------------------------
// Error

/// A fault raised by a top-level serialize or deserialize call.
///
/// A call either fully succeeds or reports exactly one of these; the engine
/// never hands back a partially converted tree or value, and never retries.
///
/// Faults raised inside user adapters (usually built with [`Error::custom`])
/// are propagated to the caller unchanged.
#[derive(Debug)]
pub enum Error {
    /// A wrapper identity was re-entered often enough to prove a reference
    /// cycle that back-reference omission cannot break.
    CircularReference { type_path: Cow<'static, str> },
    /// Recursion exceeded the configured depth limit.
    DepthLimit { limit: usize },
    /// A document node is incompatible with the requested type.
    TypeMismatch {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
        path: String,
    },
    /// Deserialization was asked for a type with no registered metadata.
    UnregisteredType { type_path: Cow<'static, str> },
    /// An opaque type without a registered to-document capability.
    NotSerializable { type_path: Cow<'static, str> },
    /// An opaque type without a registered from-document capability.
    NotDeserializable { type_path: Cow<'static, str> },
    /// A struct or container target without a registered default capability.
    MissingDefault { type_path: Cow<'static, str> },
    /// A guarded wrapper value could not be borrowed during serialization.
    Inaccessible { type_path: Cow<'static, str> },
    /// A fault raised by a user adapter.
    Message(Cow<'static, str>),
}

impl Error {
    /// Creates an adapter fault from any displayable message.
    ///
    /// # Examples
    ///
    /// ```
    /// # use docbind::Error;
    /// let err = Error::custom("leg count must be even");
    /// assert_eq!(err.to_string(), "leg count must be even");
    /// ```
    pub fn custom(message: impl fmt::Display) -> Self {
        Error::Message(Cow::Owned(message.to_string()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CircularReference { type_path } => {
                write!(f, "circular reference through `{type_path}`")
            }
            Self::DepthLimit { limit } => {
                write!(f, "recursion exceeded the depth limit of {limit}")
            }
            Self::TypeMismatch {
                expected,
                found,
                path,
            } => {
                write!(f, "expected {expected}, found {found} at {path}")
            }
            Self::UnregisteredType { type_path } => {
                write!(f, "type `{type_path}` is not registered")
            }
            Self::NotSerializable { type_path } => {
                write!(f, "no serialization available for type `{type_path}`")
            }
            Self::NotDeserializable { type_path } => {
                write!(f, "no deserialization available for type `{type_path}`")
            }
            Self::MissingDefault { type_path } => {
                write!(f, "type `{type_path}` has no registered default")
            }
            Self::Inaccessible { type_path } => {
                write!(f, "value of `{type_path}` is currently inaccessible")
            }
            Self::Message(message) => f.write_str(message),
        }
    }
}

impl error::Error for Error {}

// -----------------------------------------------------------------------------
// Tests

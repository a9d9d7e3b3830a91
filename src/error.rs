use serde::{de, ser};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding XDR and RPC messages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A custom error message from serde
    #[error("{0}")]
    Message(String),

    /// Attempted to read past the end of the input buffer
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// An opaque/string length or array count promises more data than remains
    #[error("length {len} exceeds the {remaining} bytes remaining")]
    MalformedLength { len: u32, remaining: usize },

    /// A sequence or map length was not known ahead of time (XDR requires it)
    #[error("sequence length must be known before serialization (XDR requires a length prefix)")]
    LengthRequired,

    /// A string contained non-UTF-8 bytes
    #[error("string contains invalid bytes")]
    InvalidString,

    /// A union or enum discriminant has no mapped alternative
    #[error("unmapped discriminant {value}, expected {expected}")]
    UnmappedDiscriminant { value: u32, expected: String },

    /// The boolean encoding was neither 0 nor 1
    #[error("invalid boolean encoding: {0} (must be 0 or 1)")]
    InvalidBool(u32),

    /// An optional value had an invalid discriminant (must be 0 or 1)
    #[error("invalid optional discriminant: {0} (must be 0 or 1)")]
    InvalidOption(u32),

    /// Data exceeded a configured or protocol maximum length
    #[error("length {got} exceeds maximum {max}")]
    LengthOverflow { max: usize, got: usize },

    /// A wire integer does not fit the narrower Rust integer it decodes into
    #[error("integer {value} out of range for {ty}")]
    IntegerOutOfRange { value: i64, ty: &'static str },

    /// Bytes were left over inside a length-delimited body
    #[error("{0} trailing bytes after the encoded value")]
    TrailingBytes(usize),

    /// Padding bytes were non-zero (strict mode violation)
    #[error("non-zero padding bytes")]
    InvalidPadding,

    /// XDR does not support this serde data model type
    #[error("XDR does not support type: {0}")]
    Unsupported(&'static str),

    /// An I/O error occurred during writing
    #[error("I/O error: {0}")]
    Io(String),

    /// An RPC header carried the wrong `msg_type`
    #[error("unexpected message type {got} (expected {expected})")]
    UnexpectedMessageType { expected: u32, got: u32 },

    /// An `opaque_auth` was decoded as a flavor it does not carry
    #[error("unexpected auth flavor {got} (expected {expected})")]
    UnexpectedFlavor { expected: u32, got: u32 },
}

impl Error {
    pub(crate) fn unmapped(value: u32, expected: impl fmt::Display) -> Self {
        Error::UnmappedDiscriminant {
            value,
            expected: expected.to_string(),
        }
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    // Only an `Expected` built from `Discriminant` becomes `UnmappedDiscriminant`.
    fn invalid_value(unexp: de::Unexpected<'_>, exp: &dyn de::Expected) -> Self {
        let expected = exp.to_string();
        match (unexp, expected.strip_prefix(DISCRIMINANT_OF)) {
            (de::Unexpected::Unsigned(v), Some(name)) => {
                Error::unmapped(u32::try_from(v).unwrap_or(u32::MAX), name)
            }
            _ => Error::Message(format!("invalid value: {}, expected {}", unexp, expected)),
        }
    }
}

const DISCRIMINANT_OF: &str = "a discriminant of ";

/// The `Expected` for a tag rejected by an enum or union decoder that is
/// generic over the serde error type.
pub(crate) struct Discriminant(pub(crate) &'static str);

impl de::Expected for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISCRIMINANT_OF, self.0)
    }
}

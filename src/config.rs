//! Decoder limits.
//!
//! XDR itself only bounds a length by the 32-bit prefix. A server reading
//! untrusted input usually wants a tighter ceiling, and may want to reject
//! non-zero padding the way RFC 4506 §3 requires of a conforming encoder.
//!
//! ```rust
//! use xdr_rpc::{Config, Error, from_bytes_with_config};
//!
//! let config = Config::new().max_length(4);
//! let bytes = [0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o', 0, 0, 0];
//! let err = from_bytes_with_config::<String>(&bytes, config).unwrap_err();
//! assert_eq!(err, Error::LengthOverflow { max: 4, got: 5 });
//! ```

/// Limits applied by [`Deserializer`](crate::Deserializer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest accepted opaque/string length or array element count.
    pub max_length: u32,
    /// Reject padding bytes that are not zero.
    pub strict_padding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_length: u32::MAX,
            strict_padding: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn strict_padding(mut self, strict: bool) -> Self {
        self.strict_padding = strict;
        self
    }
}

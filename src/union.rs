//! XDR discriminated unions (RFC 4506 §4.15).
//!
//! A union is written as its discriminant followed by the encoding of the
//! one arm that discriminant selects:
//!
//! ```text
//! +---+---+---+---+---+---+---+---+...
//! |   discriminant |  implied arm  |...
//! +---+---+---+---+---+---+---+---+...
//! ```
//!
//! Plain serde enums already encode this way with the variant index as the
//! discriminant. [`XdrUnion`] is for unions whose discriminant is a protocol
//! enumeration: the arm is chosen by an exhaustive `match` on the decoded
//! discriminant value, so the mapping cannot drift from the declaration order
//! of the Rust enum.
//!
//! ```rust
//! use serde::de::SeqAccess;
//! use serde::ser::SerializeTuple;
//! use xdr_rpc::union::{self, XdrUnion};
//! use xdr_rpc::{MsgType, from_bytes, to_bytes};
//!
//! #[derive(Debug, PartialEq)]
//! enum Ping {
//!     Request(u32),
//!     Response,
//! }
//!
//! impl XdrUnion for Ping {
//!     type Discriminant = MsgType;
//!
//!     fn discriminant(&self) -> MsgType {
//!         match self {
//!             Ping::Request(_) => MsgType::Call,
//!             Ping::Response => MsgType::Reply,
//!         }
//!     }
//!
//!     fn serialize_arm<S: SerializeTuple>(&self, arm: &mut S) -> Result<(), S::Error> {
//!         match self {
//!             Ping::Request(seq) => arm.serialize_element(seq),
//!             Ping::Response => Ok(()),
//!         }
//!     }
//!
//!     fn deserialize_arm<'de, A: SeqAccess<'de>>(
//!         tag: MsgType,
//!         seq: &mut A,
//!     ) -> Result<Self, A::Error> {
//!         match tag {
//!             MsgType::Call => union::arm(seq).map(Ping::Request),
//!             MsgType::Reply => Ok(Ping::Response),
//!         }
//!     }
//! }
//!
//! impl serde::Serialize for Ping {
//!     fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
//!         union::serialize(self, s)
//!     }
//! }
//!
//! impl<'de> serde::Deserialize<'de> for Ping {
//!     fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
//!         union::deserialize(d)
//!     }
//! }
//!
//! let bytes = to_bytes(&Ping::Request(7)).unwrap();
//! assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 7]);
//! assert_eq!(from_bytes::<Ping>(&[0, 0, 0, 1]).unwrap(), Ping::Response);
//! assert!(from_bytes::<Ping>(&[0, 0, 0, 2]).is_err());
//! ```

use crate::error::Discriminant;
use serde::de::{self, Deserialize, DeserializeOwned, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A discriminated union keyed by a protocol enumeration.
pub trait XdrUnion: Sized {
    /// The enumeration written ahead of the arm.
    type Discriminant: Serialize + DeserializeOwned + Copy;

    /// The discriminant of the active arm.
    fn discriminant(&self) -> Self::Discriminant;

    /// Write the active arm. Void arms write nothing.
    fn serialize_arm<S: SerializeTuple>(&self, arm: &mut S) -> Result<(), S::Error>;

    /// Decode the arm selected by `tag`. A declared tag with no arm must be
    /// rejected with [`unmapped`].
    fn deserialize_arm<'de, A: SeqAccess<'de>>(
        tag: Self::Discriminant,
        seq: &mut A,
    ) -> Result<Self, A::Error>;
}

/// Serialize `value` as its discriminant followed by its active arm.
pub fn serialize<U: XdrUnion, S: Serializer>(value: &U, serializer: S) -> Result<S::Ok, S::Error> {
    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(&value.discriminant())?;
    value.serialize_arm(&mut tuple)?;
    tuple.end()
}

/// Read a discriminant, then the arm it selects.
pub fn deserialize<'de, U: XdrUnion, D: de::Deserializer<'de>>(
    deserializer: D,
) -> Result<U, D::Error> {
    deserializer.deserialize_tuple(2, UnionVisitor(PhantomData))
}

/// Decode the payload of the selected arm.
pub fn arm<'de, T: Deserialize<'de>, A: SeqAccess<'de>>(seq: &mut A) -> Result<T, A::Error> {
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(1, &"a union arm"))
}

/// The error for a declared discriminant value that selects no arm.
pub fn unmapped<E: de::Error>(tag: impl Into<u32>, union: &'static str) -> E {
    E::invalid_value(
        de::Unexpected::Unsigned(u64::from(tag.into())),
        &Discriminant(union),
    )
}

struct UnionVisitor<U>(PhantomData<U>);

impl<'de, U: XdrUnion> Visitor<'de> for UnionVisitor<U> {
    type Value = U;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an XDR discriminated union")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<U, A::Error> {
        let tag = seq
            .next_element::<U::Discriminant>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        U::deserialize_arm(tag, &mut seq)
    }
}

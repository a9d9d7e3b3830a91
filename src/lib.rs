//! # xdr-rpc
//!
//! XDR (eXternal Data Representation, RFC 4506) serialization built on
//! `serde`, and the ONC RPC (RFC 5531) message schema that frames every
//! request and response of an NFS-style server.
//!
//! ## Overview
//!
//! All values are big-endian (network byte order), and every item occupies a
//! multiple of 4 bytes (padded with zeroes as needed). Records derive
//! `Serialize`/`Deserialize`; their field declaration order is their wire
//! order, and the deserializer reads fields back in exactly that order.
//!
//! ## Serde type mapping
//!
//! | Rust / serde type | XDR encoding |
//! |-------------------|--------------|
//! | `bool`            | 4-byte unsigned int: 0 (false) or 1 (true) |
//! | `i8`, `i16`, `i32` | 4-byte signed int (sign-extended) |
//! | `i64`             | 8-byte hyper integer |
//! | `u8`, `u16`, `u32` | 4-byte unsigned int (zero-extended) |
//! | `u64`             | 8-byte unsigned hyper integer |
//! | `f32`, `f64`      | IEEE 754 single / double precision |
//! | `&str`, `String`  | 4-byte length + UTF-8 bytes + 0-3 zero-padding bytes |
//! | `serde_bytes`     | 4-byte length + bytes + 0-3 zero-padding bytes |
//! | `Option<T>`       | 4-byte bool discriminant + optional encoded T |
//! | `()` / unit struct | 0 bytes (XDR void) |
//! | enum variant      | 4-byte discriminant (variant index) + encoded arm |
//! | [`union::XdrUnion`] | 4-byte protocol discriminant + encoded arm |
//! | `Vec<T>` / seq    | 4-byte count + encoded elements |
//! | Tuple / tuple struct | fields encoded consecutively (no count prefix) |
//! | Struct            | fields encoded consecutively (no count prefix) |
//!
//! ## Example
//!
//! ```rust
//! use xdr_rpc::rpc::{AuthFlavor, OpaqueAuth, RpcMsgReply, AcceptStat, success_reply};
//! use xdr_rpc::{from_bytes, to_bytes};
//!
//! let verf = OpaqueAuth { flavor: AuthFlavor::AuthNone, body: vec![] };
//! assert_eq!(to_bytes(&verf).unwrap(), [0u8; 8]);
//!
//! let reply = RpcMsgReply::accepted(42, AcceptStat::Success);
//! let bytes = to_bytes(&reply).unwrap();
//! assert_eq!(bytes, success_reply(42));
//! assert_eq!(from_bytes::<RpcMsgReply>(&bytes).unwrap(), reply);
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod de;
pub mod error;
pub mod rpc;
pub mod ser;
pub mod union;

pub use config::Config;
pub use de::{Deserializer, from_bytes, from_bytes_partial, from_bytes_with_config};
pub use error::{Error, Result};
pub use rpc::{
    AcceptStat, AuthFlavor, AuthStat, MsgType, OpaqueAuth, RejectStat, ReplyStat, RpcMsgCall,
    RpcMsgReply,
};
pub use ser::{Serializer, to_bytes, to_writer};

pub use serde::{Deserialize, Serialize};

/// Zero bytes needed after `len` bytes of opaque data to reach a 4-byte
/// boundary.
pub(crate) fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

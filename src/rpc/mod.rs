//! ONC RPC message schema (RFC 5531).
//!
//! A call on the wire is the [`RpcMsgCall`] header immediately followed by the
//! procedure's arguments; a reply is the [`RpcMsgReply`] header followed by
//! the procedure's results. [`decode_call`] and [`decode_reply`] read the
//! header and hand back the bytes that follow it.
//!
//! ```rust
//! use xdr_rpc::rpc::{CallBody, RpcMsgCall, decode_call};
//! use xdr_rpc::to_bytes;
//!
//! let call = RpcMsgCall::new(7, CallBody::new(100003, 3, 1));
//! let mut bytes = to_bytes(&call).unwrap();
//! bytes.extend_from_slice(&[0, 0, 0, 9]); // procedure arguments
//!
//! let (decoded, args) = decode_call(&bytes).unwrap();
//! assert_eq!(decoded, call);
//! assert_eq!(args, [0, 0, 0, 9]);
//! ```

pub mod auth;
pub mod msg;
pub mod reply;

pub use auth::{
    AuthFlavor, AuthStat, AuthSysParms, MAX_AUTH_BYTES, MAX_AUTH_GIDS, MAX_MACHINE_NAME, OpaqueAuth,
};
pub use msg::{
    AcceptStat, AcceptedReply, CallBody, MismatchInfo, MsgBody, MsgType, RPC_VERSION,
    RejectStat, RejectedReply, ReplyBody, ReplyStat, RpcMsg, RpcMsgCall, RpcMsgReply,
};
pub use reply::{ACCEPTED_REPLY_LEN, serialize_reply, success_reply};

use crate::config::Config;
use crate::de::Deserializer;
use crate::error::{Error, Result};
use crate::union::XdrUnion;
use serde::Deserialize;

/// Decode a call header, returning it with the procedure arguments that
/// follow.
pub fn decode_call(input: &[u8]) -> Result<(RpcMsgCall, &[u8])> {
    decode_call_with_config(input, Config::default())
}

/// [`decode_call`] with explicit decoder limits.
///
/// The header must carry `msg_type == CALL` and credential and verifier
/// bodies within [`MAX_AUTH_BYTES`]. An unsupported `rpcvers` is not an error
/// here: see [`CallBody::rpc_version_matches`].
pub fn decode_call_with_config(input: &[u8], config: Config) -> Result<(RpcMsgCall, &[u8])> {
    let mut de = Deserializer::with_config(input, config);
    let call = RpcMsgCall::deserialize(&mut de)?;
    expect_msg_type(call.xid, MsgType::Call, call.mtype)?;
    for auth in [&call.cbody.cred, &call.cbody.verf] {
        auth.check_body_len().inspect_err(|_| {
            tracing::debug!(xid = call.xid, len = auth.body.len(), "oversized auth body");
        })?;
    }
    tracing::trace!(
        xid = call.xid,
        prog = call.cbody.prog,
        vers = call.cbody.vers,
        proc_ = call.cbody.proc_,
        "decoded call header"
    );
    Ok((call, de.remaining()))
}

/// Decode a reply header, returning it with the procedure results that
/// follow.
pub fn decode_reply(input: &[u8]) -> Result<(RpcMsgReply, &[u8])> {
    let mut de = Deserializer::new(input);
    let reply = RpcMsgReply::deserialize(&mut de)?;
    expect_msg_type(reply.xid, MsgType::Reply, reply.mtype)?;
    if let ReplyBody::Accepted(accepted) = &reply.rbody {
        accepted.verf.check_body_len()?;
    }
    tracing::trace!(xid = reply.xid, stat = ?reply.rbody.discriminant(), "decoded reply header");
    Ok((reply, de.remaining()))
}

fn expect_msg_type(xid: u32, expected: MsgType, got: MsgType) -> Result<()> {
    if got != expected {
        tracing::debug!(xid, ?expected, ?got, "unexpected message type");
        return Err(Error::UnexpectedMessageType {
            expected: expected.into(),
            got: got.into(),
        });
    }
    Ok(())
}

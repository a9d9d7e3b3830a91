//! Fast path for the most common reply: accepted, `AUTH_NONE` verifier.
//!
//! The header is written field by field without building an [`RpcMsgReply`],
//! and is byte-identical to encoding `RpcMsgReply::accepted(xid, stat)`.
//!
//! ```text
//! xid | mtype=1 | reply_stat=0 | verf.flavor=0 | verf.len=0 | accept_stat
//! ```
//!
//! [`RpcMsgReply`]: super::RpcMsgReply

use super::auth::AuthFlavor;
use super::msg::{AcceptStat, MsgType, ReplyStat};
use crate::error::{Error, Result};
use std::io::Write;

/// Length of an accepted reply header with an empty verifier.
pub const ACCEPTED_REPLY_LEN: usize = 24;

/// Write the accepted reply header for `xid` with the given status.
/// Procedure results, if any, are appended by the caller.
pub fn serialize_reply<W: Write>(writer: &mut W, status: AcceptStat, xid: u32) -> Result<()> {
    tracing::trace!(xid, ?status, "writing accepted reply header");
    writer
        .write_all(&accepted_header(status, xid))
        .map_err(|e| Error::Io(e.to_string()))
}

/// The 24 bytes acknowledging a successfully processed call.
pub fn success_reply(xid: u32) -> Vec<u8> {
    accepted_header(AcceptStat::Success, xid).to_vec()
}

fn accepted_header(status: AcceptStat, xid: u32) -> [u8; ACCEPTED_REPLY_LEN] {
    let words = [
        xid,
        MsgType::Reply.into(),
        ReplyStat::MsgAccepted.into(),
        AuthFlavor::AuthNone.into(),
        0,
        status.into(),
    ];
    let mut out = [0u8; ACCEPTED_REPLY_LEN];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

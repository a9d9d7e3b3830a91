//! Call and reply envelopes.

use super::auth::{AuthStat, OpaqueAuth};
use crate::union::{self, XdrUnion};
use serde::de::SeqAccess;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

/// The only RPC protocol version this schema speaks.
pub const RPC_VERSION: u32 = 2;

xdr_enum! {
    /// `msg_type`
    pub enum MsgType {
        Call = 0,
        Reply = 1,
    }
}

xdr_enum! {
    /// `reply_stat`
    pub enum ReplyStat {
        MsgAccepted = 0,
        MsgDenied = 1,
    }
}

xdr_enum! {
    /// `accept_stat`
    pub enum AcceptStat {
        /// RPC executed successfully
        Success = 0,
        /// remote hasn't exported program
        ProgUnavail = 1,
        /// remote can't support version
        ProgMismatch = 2,
        /// program can't support procedure
        ProcUnavail = 3,
        /// procedure can't decode params
        GarbageArgs = 4,
        /// e.g. memory allocation failure
        SystemErr = 5,
    }
}

xdr_enum! {
    /// `reject_stat`
    pub enum RejectStat {
        /// RPC version number != 2
        RpcMismatch = 0,
        /// remote can't authenticate caller
        AuthError = 1,
    }
}

/// `call_body`. Procedure arguments follow it on the wire and are not part
/// of this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallBody {
    pub rpcvers: u32,
    pub prog: u32,
    pub vers: u32,
    pub proc_: u32,
    pub cred: OpaqueAuth,
    pub verf: OpaqueAuth,
}

impl CallBody {
    /// A version 2 call with `AUTH_NONE` credential and verifier.
    pub fn new(prog: u32, vers: u32, proc_: u32) -> Self {
        CallBody {
            rpcvers: RPC_VERSION,
            prog,
            vers,
            proc_,
            cred: OpaqueAuth::none(),
            verf: OpaqueAuth::none(),
        }
    }

    pub fn with_cred(mut self, cred: OpaqueAuth) -> Self {
        self.cred = cred;
        self
    }

    pub fn with_verf(mut self, verf: OpaqueAuth) -> Self {
        self.verf = verf;
        self
    }

    /// Whether the caller speaks [`RPC_VERSION`]. A call that does not is
    /// answered with [`RpcMsgReply::rpc_mismatch`].
    pub fn rpc_version_matches(&self) -> bool {
        self.rpcvers == RPC_VERSION
    }
}

/// `rpc_msg` with `mtype == CALL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcMsgCall {
    pub xid: u32,
    pub mtype: MsgType,
    pub cbody: CallBody,
}

impl RpcMsgCall {
    pub fn new(xid: u32, cbody: CallBody) -> Self {
        RpcMsgCall {
            xid,
            mtype: MsgType::Call,
            cbody,
        }
    }
}

/// `mismatch_info`: the range of versions the server supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchInfo {
    pub low: u32,
    pub high: u32,
}

/// `accepted_reply`. Procedure results, if any, follow it on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedReply {
    pub verf: OpaqueAuth,
    pub stat: AcceptStat,
}

/// `rejected_reply`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedReply {
    RpcMismatch(MismatchInfo),
    AuthError(AuthStat),
}

impl XdrUnion for RejectedReply {
    type Discriminant = RejectStat;

    fn discriminant(&self) -> RejectStat {
        match self {
            RejectedReply::RpcMismatch(_) => RejectStat::RpcMismatch,
            RejectedReply::AuthError(_) => RejectStat::AuthError,
        }
    }

    fn serialize_arm<S: SerializeTuple>(&self, arm: &mut S) -> Result<(), S::Error> {
        match self {
            RejectedReply::RpcMismatch(info) => arm.serialize_element(info),
            RejectedReply::AuthError(stat) => arm.serialize_element(stat),
        }
    }

    fn deserialize_arm<'de, A: SeqAccess<'de>>(
        tag: RejectStat,
        seq: &mut A,
    ) -> Result<Self, A::Error> {
        match tag {
            RejectStat::RpcMismatch => union::arm(seq).map(RejectedReply::RpcMismatch),
            RejectStat::AuthError => union::arm(seq).map(RejectedReply::AuthError),
        }
    }
}

xdr_union_serde!(RejectedReply);

/// `reply_body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    Accepted(AcceptedReply),
    Denied(RejectedReply),
}

impl XdrUnion for ReplyBody {
    type Discriminant = ReplyStat;

    fn discriminant(&self) -> ReplyStat {
        match self {
            ReplyBody::Accepted(_) => ReplyStat::MsgAccepted,
            ReplyBody::Denied(_) => ReplyStat::MsgDenied,
        }
    }

    fn serialize_arm<S: SerializeTuple>(&self, arm: &mut S) -> Result<(), S::Error> {
        match self {
            ReplyBody::Accepted(reply) => arm.serialize_element(reply),
            ReplyBody::Denied(reply) => arm.serialize_element(reply),
        }
    }

    fn deserialize_arm<'de, A: SeqAccess<'de>>(
        tag: ReplyStat,
        seq: &mut A,
    ) -> Result<Self, A::Error> {
        match tag {
            ReplyStat::MsgAccepted => union::arm(seq).map(ReplyBody::Accepted),
            ReplyStat::MsgDenied => union::arm(seq).map(ReplyBody::Denied),
        }
    }
}

xdr_union_serde!(ReplyBody);

/// `rpc_msg` with `mtype == REPLY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcMsgReply {
    pub xid: u32,
    pub mtype: MsgType,
    pub rbody: ReplyBody,
}

impl RpcMsgReply {
    pub fn new(xid: u32, rbody: ReplyBody) -> Self {
        RpcMsgReply {
            xid,
            mtype: MsgType::Reply,
            rbody,
        }
    }

    /// An accepted reply with an `AUTH_NONE` verifier.
    pub fn accepted(xid: u32, stat: AcceptStat) -> Self {
        Self::new(
            xid,
            ReplyBody::Accepted(AcceptedReply {
                verf: OpaqueAuth::none(),
                stat,
            }),
        )
    }

    /// A denial telling the caller that only [`RPC_VERSION`] is spoken.
    pub fn rpc_mismatch(xid: u32) -> Self {
        Self::new(
            xid,
            ReplyBody::Denied(RejectedReply::RpcMismatch(MismatchInfo {
                low: RPC_VERSION,
                high: RPC_VERSION,
            })),
        )
    }

    pub fn auth_error(xid: u32, stat: AuthStat) -> Self {
        Self::new(xid, ReplyBody::Denied(RejectedReply::AuthError(stat)))
    }
}

/// The body of a general `rpc_msg`, switched on `msg_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsgBody {
    Call(CallBody),
    Reply(ReplyBody),
}

impl XdrUnion for MsgBody {
    type Discriminant = MsgType;

    fn discriminant(&self) -> MsgType {
        match self {
            MsgBody::Call(_) => MsgType::Call,
            MsgBody::Reply(_) => MsgType::Reply,
        }
    }

    fn serialize_arm<S: SerializeTuple>(&self, arm: &mut S) -> Result<(), S::Error> {
        match self {
            MsgBody::Call(body) => arm.serialize_element(body),
            MsgBody::Reply(body) => arm.serialize_element(body),
        }
    }

    fn deserialize_arm<'de, A: SeqAccess<'de>>(
        tag: MsgType,
        seq: &mut A,
    ) -> Result<Self, A::Error> {
        match tag {
            MsgType::Call => union::arm(seq).map(MsgBody::Call),
            MsgType::Reply => union::arm(seq).map(MsgBody::Reply),
        }
    }
}

xdr_union_serde!(MsgBody);

/// `rpc_msg`, for peers that read a message before knowing its direction.
/// Encodes exactly like [`RpcMsgCall`] or [`RpcMsgReply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcMsg {
    pub xid: u32,
    pub body: MsgBody,
}

impl From<RpcMsgCall> for RpcMsg {
    fn from(call: RpcMsgCall) -> Self {
        RpcMsg {
            xid: call.xid,
            body: MsgBody::Call(call.cbody),
        }
    }
}

impl From<RpcMsgReply> for RpcMsg {
    fn from(reply: RpcMsgReply) -> Self {
        RpcMsg {
            xid: reply.xid,
            body: MsgBody::Reply(reply.rbody),
        }
    }
}

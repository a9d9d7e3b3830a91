use xdr_rpc::rpc::{
    ACCEPTED_REPLY_LEN, AcceptStat, AcceptedReply, AuthFlavor, AuthStat, AuthSysParms, CallBody,
    MAX_AUTH_BYTES, MismatchInfo, MsgBody, MsgType, OpaqueAuth, RPC_VERSION, RejectStat,
    RejectedReply, ReplyBody, ReplyStat, RpcMsg, RpcMsgCall, RpcMsgReply, decode_call,
    decode_call_with_config, decode_reply, serialize_reply, success_reply,
};
use xdr_rpc::union::XdrUnion;
use xdr_rpc::{Config, Error, from_bytes, to_bytes};

const NFS_PROGRAM: u32 = 100003;

fn unmapped(value: u32, expected: &str) -> Error {
    Error::UnmappedDiscriminant {
        value,
        expected: expected.to_string(),
    }
}

fn sample_parms() -> AuthSysParms {
    AuthSysParms {
        stamp: 0x5EED,
        machinename: "devbox".to_string(),
        uid: 1000,
        gid: 100,
        gids: vec![4, 24, 27],
    }
}

#[test]
fn test_opaque_auth_none_is_eight_zero_bytes() {
    let auth = OpaqueAuth {
        flavor: AuthFlavor::AuthNone,
        body: vec![],
    };
    let bytes = to_bytes(&auth).unwrap();
    assert_eq!(bytes, [0u8; 8]);
    assert_eq!(
        from_bytes::<OpaqueAuth>(&bytes).unwrap(),
        OpaqueAuth::none()
    );
}

#[test]
fn test_opaque_auth_body_is_padded() {
    let auth = OpaqueAuth {
        flavor: AuthFlavor::AuthShort,
        body: vec![1, 2, 3, 4, 5],
    };
    let bytes = to_bytes(&auth).unwrap();
    assert_eq!(bytes, [0, 0, 0, 2, 0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0]);
    assert_eq!(from_bytes::<OpaqueAuth>(&bytes).unwrap(), auth);
}

#[test]
fn test_auth_flavor_sparse_values() {
    assert_eq!(to_bytes(&AuthFlavor::RpcsecGss).unwrap(), [0, 0, 0, 6]);
    assert_eq!(AuthFlavor::AUTH_UNIX, AuthFlavor::AuthSys);
    assert_eq!(u32::from(AuthFlavor::AuthDh), 3);
    for value in [4u32, 5, 7] {
        let err = from_bytes::<AuthFlavor>(&value.to_be_bytes()).unwrap_err();
        assert!(
            matches!(err, Error::UnmappedDiscriminant { value: v, .. } if v == value),
            "{:?}",
            err
        );
    }
}

#[test]
fn test_protocol_enum_values() {
    for (i, stat) in AuthStat::ALL.iter().enumerate() {
        let bytes = to_bytes(stat).unwrap();
        assert_eq!(bytes, (i as u32).to_be_bytes());
        assert_eq!(from_bytes::<AuthStat>(&bytes).unwrap(), *stat);
    }
    assert_eq!(AuthStat::ALL.len(), 15);
    assert_eq!(u32::from(AuthStat::RpcsecGssCtxproblem), 14);
    assert_eq!(u32::from(AcceptStat::SystemErr), 5);
    assert_eq!(AcceptStat::try_from(2u32), Ok(AcceptStat::ProgMismatch));
    assert_eq!(AcceptStat::try_from(6u32), Err(6));
    assert_eq!(u32::from(MsgType::Reply), 1);
}

#[test]
fn test_call_layout() {
    let call = RpcMsgCall::new(0x01020304, CallBody::new(NFS_PROGRAM, 3, 1));
    let bytes = to_bytes(&call).unwrap();
    #[rustfmt::skip]
    let expected = [
        1, 2, 3, 4,          // xid
        0, 0, 0, 0,          // CALL
        0, 0, 0, 2,          // rpcvers
        0, 1, 0x86, 0xA3,    // prog 100003
        0, 0, 0, 3,          // vers
        0, 0, 0, 1,          // proc
        0, 0, 0, 0, 0, 0, 0, 0, // cred AUTH_NONE
        0, 0, 0, 0, 0, 0, 0, 0, // verf AUTH_NONE
    ];
    assert_eq!(bytes, expected);
    assert_eq!(from_bytes::<RpcMsgCall>(&bytes).unwrap(), call);
}

#[test]
fn test_decode_call_returns_procedure_args() {
    let cred = OpaqueAuth::auth_sys(&sample_parms()).unwrap();
    let call = RpcMsgCall::new(77, CallBody::new(NFS_PROGRAM, 3, 4).with_cred(cred));
    let mut bytes = to_bytes(&call).unwrap();
    let args = to_bytes(&"some/path".to_string()).unwrap();
    bytes.extend_from_slice(&args);

    let (decoded, rest) = decode_call(&bytes).unwrap();
    assert_eq!(decoded, call);
    assert_eq!(rest, &args[..]);
    assert!(decoded.cbody.rpc_version_matches());
    assert_eq!(
        AuthSysParms::from_opaque_auth(&decoded.cbody.cred).unwrap(),
        sample_parms()
    );
}

#[test]
fn test_decode_call_rejects_reply() {
    let bytes = success_reply(5);
    let err = decode_call(&bytes).unwrap_err();
    // a reply header is too short to be read as a call, or has the wrong type
    assert!(
        matches!(err, Error::UnexpectedEof | Error::UnexpectedMessageType { .. }),
        "{:?}",
        err
    );

    let mut call = RpcMsgCall::new(5, CallBody::new(NFS_PROGRAM, 3, 0));
    call.mtype = MsgType::Reply;
    let bytes = to_bytes(&call).unwrap();
    assert_eq!(
        decode_call(&bytes).unwrap_err(),
        Error::UnexpectedMessageType {
            expected: 0,
            got: 1
        }
    );
}

#[test]
fn test_decode_call_rejects_oversized_auth() {
    let mut body = CallBody::new(NFS_PROGRAM, 3, 0);
    body.verf = OpaqueAuth {
        flavor: AuthFlavor::AuthShort,
        body: vec![0; MAX_AUTH_BYTES + 4],
    };
    let bytes = to_bytes(&RpcMsgCall::new(9, body)).unwrap();
    assert_eq!(
        decode_call(&bytes).unwrap_err(),
        Error::LengthOverflow {
            max: MAX_AUTH_BYTES,
            got: MAX_AUTH_BYTES + 4
        }
    );
}

#[test]
fn test_decode_call_with_config_limits() {
    let cred = OpaqueAuth::auth_sys(&sample_parms()).unwrap();
    let body = CallBody::new(NFS_PROGRAM, 3, 0).with_cred(cred.clone());
    let bytes = to_bytes(&RpcMsgCall::new(1, body)).unwrap();

    let err = decode_call_with_config(&bytes, Config::new().max_length(16)).unwrap_err();
    assert_eq!(
        err,
        Error::LengthOverflow {
            max: 16,
            got: cred.body.len()
        }
    );
    assert!(
        decode_call_with_config(&bytes, Config::new().max_length(64)).is_ok()
    );
}

#[test]
fn test_decode_call_truncated_header() {
    let bytes = to_bytes(&RpcMsgCall::new(1, CallBody::new(NFS_PROGRAM, 3, 0))).unwrap();
    for len in [0, 3, 12, 27, 36] {
        let err = decode_call(&bytes[..len]).unwrap_err();
        assert_eq!(err, Error::UnexpectedEof, "prefix of {} bytes", len);
    }
}

#[test]
fn test_old_rpc_version_is_decoded_not_rejected() {
    let mut body = CallBody::new(NFS_PROGRAM, 3, 0);
    body.rpcvers = 1;
    let bytes = to_bytes(&RpcMsgCall::new(3, body)).unwrap();
    let (call, _) = decode_call(&bytes).unwrap();
    assert!(!call.cbody.rpc_version_matches());
}

#[test]
fn test_success_reply_bytes() {
    #[rustfmt::skip]
    let expected = [
        0, 0, 0, 0x2a,
        0, 0, 0, 1,
        0, 0, 0, 0,
        0, 0, 0, 0,
        0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    let bytes = success_reply(42);
    assert_eq!(bytes.len(), ACCEPTED_REPLY_LEN);
    assert_eq!(bytes, expected);
}

#[test]
fn test_success_reply_matches_codec() {
    for xid in [0, 42, 0xDEAD_BEEF, u32::MAX] {
        let general = RpcMsgReply::new(
            xid,
            ReplyBody::Accepted(AcceptedReply {
                verf: OpaqueAuth {
                    flavor: AuthFlavor::AuthNone,
                    body: vec![],
                },
                stat: AcceptStat::Success,
            }),
        );
        assert_eq!(
            success_reply(xid),
            to_bytes(&general).unwrap(),
            "xid {}",
            xid
        );
    }
}

#[test]
fn test_serialize_reply_matches_codec_for_every_status() {
    for &stat in AcceptStat::ALL {
        let mut fast = Vec::new();
        serialize_reply(&mut fast, stat, 1234).unwrap();
        let general = to_bytes(&RpcMsgReply::accepted(1234, stat)).unwrap();
        assert_eq!(fast, general, "{:?}", stat);

        let (decoded, rest) = decode_reply(&fast).unwrap();
        assert_eq!(decoded, RpcMsgReply::accepted(1234, stat));
        assert!(rest.is_empty());
    }
}

#[test]
fn test_rejected_reply_rpc_mismatch() {
    let rejected = RejectedReply::RpcMismatch(MismatchInfo { low: 2, high: 2 });
    let bytes = to_bytes(&rejected).unwrap();
    assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 2]);
    assert_eq!(from_bytes::<RejectedReply>(&bytes).unwrap(), rejected);
    assert_eq!(rejected.discriminant(), RejectStat::RpcMismatch);
}

#[test]
fn test_rejected_reply_auth_error() {
    let rejected = RejectedReply::AuthError(AuthStat::AuthTooweak);
    let bytes = to_bytes(&rejected).unwrap();
    assert_eq!(bytes, [0, 0, 0, 1, 0, 0, 0, 5]);
    assert_eq!(from_bytes::<RejectedReply>(&bytes).unwrap(), rejected);
}

#[test]
fn test_different_arms_never_equal() {
    let mismatch = RejectedReply::RpcMismatch(MismatchInfo { low: 2, high: 2 });
    let auth = RejectedReply::AuthError(AuthStat::AuthRejectedcred);
    assert_ne!(mismatch, auth);
    // the payload words 2 are shared, the discriminant is not
    assert_eq!(
        to_bytes(&auth).unwrap()[4..],
        to_bytes(&mismatch).unwrap()[4..8]
    );
}

#[test]
fn test_denied_reply_layout() {
    let reply = RpcMsgReply::rpc_mismatch(8);
    let bytes = to_bytes(&reply).unwrap();
    #[rustfmt::skip]
    let expected = [
        0, 0, 0, 8,   // xid
        0, 0, 0, 1,   // REPLY
        0, 0, 0, 1,   // MSG_DENIED
        0, 0, 0, 0,   // RPC_MISMATCH
        0, 0, 0, 2,   // low
        0, 0, 0, 2,   // high
    ];
    assert_eq!(bytes, expected);
    let (decoded, _) = decode_reply(&bytes).unwrap();
    assert_eq!(decoded, reply);
    assert_eq!(decoded.rbody.discriminant(), ReplyStat::MsgDenied);

    let auth = RpcMsgReply::auth_error(8, AuthStat::AuthBadcred);
    let bytes = to_bytes(&auth).unwrap();
    assert_eq!(&bytes[8..], [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1]);
    assert_eq!(from_bytes::<RpcMsgReply>(&bytes).unwrap(), auth);
}

#[test]
fn test_unmapped_reply_stat() {
    let mut bytes = success_reply(1);
    bytes[8..12].copy_from_slice(&2u32.to_be_bytes());
    let err = from_bytes::<RpcMsgReply>(&bytes).unwrap_err();
    assert_eq!(err, unmapped(2, "ReplyStat"));
}

#[test]
fn test_unmapped_reject_stat_and_auth_stat() {
    let err = from_bytes::<RejectedReply>(&[0, 0, 0, 7, 0, 0, 0, 0]).unwrap_err();
    assert!(
        matches!(err, Error::UnmappedDiscriminant { value: 7, .. }),
        "{:?}",
        err
    );

    let err = from_bytes::<RejectedReply>(&[0, 0, 0, 1, 0, 0, 0, 15]).unwrap_err();
    assert_eq!(err, unmapped(15, "AuthStat"));
}

#[test]
fn test_unmapped_accept_stat() {
    let mut bytes = success_reply(1);
    bytes[20..24].copy_from_slice(&6u32.to_be_bytes());
    let err = decode_reply(&bytes).unwrap_err();
    assert!(
        matches!(err, Error::UnmappedDiscriminant { value: 6, .. }),
        "{:?}",
        err
    );
}

#[test]
fn test_general_message_matches_directional_envelopes() {
    let call = RpcMsgCall::new(11, CallBody::new(NFS_PROGRAM, 3, 2));
    let call_bytes = to_bytes(&call).unwrap();
    let msg: RpcMsg = from_bytes(&call_bytes).unwrap();
    assert_eq!(msg, RpcMsg::from(call.clone()));
    assert!(
        matches!(msg.body, MsgBody::Call(ref body) if *body == call.cbody)
    );
    assert_eq!(to_bytes(&msg).unwrap(), call_bytes);

    let reply = RpcMsgReply::auth_error(12, AuthStat::AuthFailed);
    let reply_bytes = to_bytes(&reply).unwrap();
    let msg: RpcMsg = from_bytes(&reply_bytes).unwrap();
    assert_eq!(msg, RpcMsg::from(reply));
    assert_eq!(to_bytes(&msg).unwrap(), reply_bytes);
}

#[test]
fn test_unmapped_msg_type() {
    let err = from_bytes::<RpcMsg>(&[0, 0, 0, 1, 0, 0, 0, 2]).unwrap_err();
    assert_eq!(err, unmapped(2, "MsgType"));
}

#[test]
fn test_authsys_parms_layout() {
    let parms = AuthSysParms {
        stamp: 1,
        machinename: "host".to_string(),
        uid: 0,
        gid: 0,
        gids: vec![],
    };
    let bytes = to_bytes(&parms).unwrap();
    #[rustfmt::skip]
    let expected = [
        0, 0, 0, 1,
        0, 0, 0, 4, b'h', b'o', b's', b't',
        0, 0, 0, 0,
        0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn test_authsys_is_decoded_only_on_request() {
    let cred = OpaqueAuth::auth_sys(&sample_parms()).unwrap();
    assert_eq!(cred.flavor, AuthFlavor::AuthSys);
    assert_eq!(cred.body, to_bytes(&sample_parms()).unwrap());

    let decoded: OpaqueAuth = from_bytes(&to_bytes(&cred).unwrap()).unwrap();
    assert_eq!(decoded, cred);
    assert_eq!(
        AuthSysParms::from_opaque_auth(&decoded).unwrap(),
        sample_parms()
    );
}

#[test]
fn test_authsys_wrong_flavor() {
    let err = AuthSysParms::from_opaque_auth(&OpaqueAuth::none()).unwrap_err();
    assert_eq!(
        err,
        Error::UnexpectedFlavor {
            expected: 1,
            got: 0
        }
    );
}

#[test]
fn test_authsys_limits() {
    let mut parms = sample_parms();
    parms.gids = (0..17).collect();
    assert_eq!(
        OpaqueAuth::auth_sys(&parms).unwrap_err(),
        Error::LengthOverflow { max: 16, got: 17 }
    );

    let forged = OpaqueAuth {
        flavor: AuthFlavor::AuthSys,
        body: to_bytes(&parms).unwrap(),
    };
    assert_eq!(
        AuthSysParms::from_opaque_auth(&forged).unwrap_err(),
        Error::LengthOverflow { max: 16, got: 17 }
    );

    let mut parms = sample_parms();
    parms.machinename = "x".repeat(256);
    assert_eq!(
        OpaqueAuth::auth_sys(&parms).unwrap_err(),
        Error::LengthOverflow { max: 255, got: 256 }
    );
}

#[test]
fn test_authsys_truncated_body() {
    let mut body = to_bytes(&sample_parms()).unwrap();
    body.truncate(body.len() - 4);
    let cred = OpaqueAuth {
        flavor: AuthFlavor::AuthSys,
        body,
    };
    assert!(AuthSysParms::from_opaque_auth(&cred).is_err());
}

#[test]
fn test_authsys_rejects_trailing_body_bytes() {
    let mut body = to_bytes(&sample_parms()).unwrap();
    body.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 7]);
    let cred = OpaqueAuth {
        flavor: AuthFlavor::AuthSys,
        body,
    };
    assert_eq!(
        AuthSysParms::from_opaque_auth(&cred).unwrap_err(),
        Error::TrailingBytes(8)
    );
}

#[test]
fn test_call_body_builders() {
    let cred = OpaqueAuth::auth_sys(&sample_parms()).unwrap();
    let verf = OpaqueAuth {
        flavor: AuthFlavor::AuthShort,
        body: vec![0xAB; 8],
    };
    let body = CallBody::new(NFS_PROGRAM, 3, 6)
        .with_cred(cred.clone())
        .with_verf(verf.clone());
    assert_eq!(body.cred, cred);
    assert_eq!(body.verf, verf);

    let bytes = to_bytes(&RpcMsgCall::new(4, body.clone())).unwrap();
    let (decoded, _) = decode_call(&bytes).unwrap();
    assert_eq!(decoded.cbody, body);
}

#[test]
fn test_rpc_version_constant() {
    assert_eq!(RPC_VERSION, 2);
    assert_eq!(CallBody::new(1, 1, 1).rpcvers, RPC_VERSION);
}

//! Authentication blobs carried by every call and accepted reply.

use crate::error::{Error, Result};
use crate::{from_bytes_partial, to_bytes};
use serde::{Deserialize, Serialize};

/// Largest `opaque_auth` body RFC 5531 allows.
pub const MAX_AUTH_BYTES: usize = 400;

/// Largest `authsys_parms.machinename`.
pub const MAX_MACHINE_NAME: usize = 255;

/// Largest number of supplementary groups in `authsys_parms.gids`.
pub const MAX_AUTH_GIDS: usize = 16;

xdr_enum! {
    /// `auth_flavor`
    pub enum AuthFlavor {
        AuthNone = 0,
        AuthSys = 1,
        AuthShort = 2,
        AuthDh = 3,
        RpcsecGss = 6,
    }
}

impl AuthFlavor {
    /// `AUTH_UNIX` is the historical name of `AUTH_SYS`.
    pub const AUTH_UNIX: AuthFlavor = AuthFlavor::AuthSys;
}

xdr_enum! {
    /// `auth_stat`: why the server refused the caller's credentials.
    pub enum AuthStat {
        AuthOk = 0,
        // failed at remote end
        AuthBadcred = 1,
        AuthRejectedcred = 2,
        AuthBadverf = 3,
        AuthRejectedverf = 4,
        AuthTooweak = 5,
        // failed locally
        AuthInvalidresp = 6,
        AuthFailed = 7,
        // AUTH_KERB errors, deprecated by RFC 2695
        AuthKerbGeneric = 8,
        AuthTimeexpire = 9,
        AuthTktFile = 10,
        AuthDecode = 11,
        AuthNetAddr = 12,
        // RPCSEC_GSS
        RpcsecGssCredproblem = 13,
        RpcsecGssCtxproblem = 14,
    }
}

/// `opaque_auth`: a credential or verifier. The body is not interpreted here;
/// see [`AuthSysParms::from_opaque_auth`] for the one flavor this crate can
/// open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueAuth {
    pub flavor: AuthFlavor,
    #[serde(with = "serde_bytes")]
    pub body: Vec<u8>,
}

impl OpaqueAuth {
    /// `AUTH_NONE` with an empty body.
    pub fn none() -> Self {
        OpaqueAuth {
            flavor: AuthFlavor::AuthNone,
            body: Vec::new(),
        }
    }

    /// An `AUTH_SYS` credential wrapping `parms`.
    pub fn auth_sys(parms: &AuthSysParms) -> Result<Self> {
        parms.check_limits()?;
        let body = to_bytes(parms)?;
        check_len(body.len(), MAX_AUTH_BYTES)?;
        Ok(OpaqueAuth {
            flavor: AuthFlavor::AuthSys,
            body,
        })
    }

    pub(crate) fn check_body_len(&self) -> Result<()> {
        check_len(self.body.len(), MAX_AUTH_BYTES)
    }
}

impl Default for OpaqueAuth {
    fn default() -> Self {
        Self::none()
    }
}

/// `authsys_parms`: the body of an `AUTH_SYS` credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSysParms {
    pub stamp: u32,
    pub machinename: String,
    pub uid: u32,
    pub gid: u32,
    pub gids: Vec<u32>,
}

impl AuthSysParms {
    /// Decode the body of an `AUTH_SYS` credential.
    pub fn from_opaque_auth(auth: &OpaqueAuth) -> Result<Self> {
        if auth.flavor != AuthFlavor::AuthSys {
            tracing::debug!(flavor = ?auth.flavor, "credential is not AUTH_SYS");
            return Err(Error::UnexpectedFlavor {
                expected: AuthFlavor::AuthSys.into(),
                got: auth.flavor.into(),
            });
        }
        let (parms, rest): (AuthSysParms, _) = from_bytes_partial(&auth.body)?;
        if !rest.is_empty() {
            return Err(Error::TrailingBytes(rest.len()));
        }
        parms.check_limits()?;
        Ok(parms)
    }

    fn check_limits(&self) -> Result<()> {
        check_len(self.machinename.len(), MAX_MACHINE_NAME)?;
        check_len(self.gids.len(), MAX_AUTH_GIDS)
    }
}

fn check_len(got: usize, max: usize) -> Result<()> {
    if got > max {
        return Err(Error::LengthOverflow { max, got });
    }
    Ok(())
}

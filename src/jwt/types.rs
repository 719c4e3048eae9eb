use serde::Serialize;

use super::claims::Claims;
use super::constants::{JWT_TYPE, RS256_ALG};

/// JOSE header of a compact token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JwtHeader {
    pub alg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl JwtHeader {
    /// Header issued by this crate: `{"alg":"RS256","typ":"JWT"}` plus an optional `kid`.
    pub fn rs256(kid: Option<&str>) -> Self {
        Self {
            alg: RS256_ALG.to_string(),
            typ: Some(JWT_TYPE.to_string()),
            kid: kid.map(str::to_string),
        }
    }
}

/// Result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtTokenData {
    pub header: JwtHeader,
    pub claims: Claims,
}

impl JwtTokenData {
    /// Key identifier from the verified header, if any.
    pub fn key_id(&self) -> Option<&str> {
        self.header.kid.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct JwtValidationOptions {
    /// Expected `iss`; when set, the token must carry exactly this issuer.
    pub issuer: Option<String>,
    /// Accepted `aud` values; empty disables the audience check.
    pub audience: Vec<String>,
    /// Seconds of clock skew tolerated by the `exp` and `nbf` gates.
    pub leeway: u64,
    pub validate_exp: bool,
    pub validate_nbf: bool,
    /// When set, tokens whose `iat` lies more than this many seconds ahead of
    /// `now` are rejected. `iat` is informational otherwise.
    pub max_issued_at_skew: Option<u64>,
}

impl JwtValidationOptions {
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience.push(audience.into());
        self
    }

    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn with_max_issued_at_skew(mut self, skew: u64) -> Self {
        self.max_issued_at_skew = Some(skew);
        self
    }
}

impl Default for JwtValidationOptions {
    fn default() -> Self {
        Self {
            issuer: None,
            audience: Vec::new(),
            leeway: 0,
            validate_exp: true,
            validate_nbf: true,
            max_issued_at_skew: None,
        }
    }
}

use crate::error::Error;

use super::super::keys::{decode_public_key, PublicKey};
use super::super::token::unix_time_now;
use super::super::types::{JwtHeader, JwtTokenData, JwtValidationOptions};
use super::checks::{validate_alg, validate_expected_claims, validate_time_bounds, verify_rs256};
use super::helpers::{decode_jwt_claims, decode_jwt_header, decode_jwt_signature, split_jwt};

/// Verifies tokens against a single RSA public key.
#[derive(Debug, Clone)]
pub struct JwtValidator {
    key: PublicKey,
    options: JwtValidationOptions,
}

impl JwtValidator {
    pub fn new(key: PublicKey) -> Self {
        Self {
            key,
            options: JwtValidationOptions::default(),
        }
    }

    /// Creates a validator from a PEM-encoded public key.
    pub fn new_with_public_key(public_key_pem: &[u8]) -> Result<Self, Error> {
        Ok(Self::new(decode_public_key(public_key_pem)?))
    }

    pub fn with_options(mut self, options: JwtValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &JwtValidationOptions {
        &self.options
    }

    /// Validates a token against the system clock.
    pub fn validate(&self, token: &str) -> Result<JwtTokenData, Error> {
        self.validate_at(token, unix_time_now())
    }

    pub fn validate_at(&self, token: &str, now: u64) -> Result<JwtTokenData, Error> {
        verify_with_options(token, &self.key, now, &self.options)
    }
}

/// Reads the header of a token without verifying anything beyond its structure.
///
/// This is the first half of a two-step verification: use the returned `kid` to
/// pick key material, then call [`verify`]. Nothing in the returned header is
/// trustworthy until that second step succeeds.
pub fn decode_header(token: &str) -> Result<JwtHeader, Error> {
    let parts = split_jwt(token)?;
    decode_jwt_header(parts.header)
}

/// Verifies `token` with `public_key` as of `now` using default options.
pub fn verify(token: &str, public_key: &PublicKey, now: u64) -> Result<JwtTokenData, Error> {
    verify_with_options(token, public_key, now, &JwtValidationOptions::default())
}

/// Runs the verification stages in order, stopping at the first failure:
///
/// 1. structure: exactly three non-empty `.`-separated segments;
/// 2. decode: base64url and json of header and payload, base64url of signature;
/// 3. signature: `alg` must be RS256, then the signature is checked over the
///    received `header.payload` bytes;
/// 4. temporal: `exp`, `nbf` and the optional `iat` skew, then any expected
///    issuer and audience from `options`.
pub fn verify_with_options(
    token: &str,
    public_key: &PublicKey,
    now: u64,
    options: &JwtValidationOptions,
) -> Result<JwtTokenData, Error> {
    let parts = split_jwt(token)?;

    let header = decode_jwt_header(parts.header)?;
    let claims = decode_jwt_claims(parts.payload)?;
    let signature = decode_jwt_signature(parts.signature)?;

    validate_alg(&header)?;
    verify_rs256(public_key, parts.signing_input, &signature)?;

    validate_time_bounds(&claims, options, now)?;
    validate_expected_claims(&claims, options)?;

    Ok(JwtTokenData { header, claims })
}

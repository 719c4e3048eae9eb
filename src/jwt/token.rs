use crate::base64url;
use crate::error::Error;
use signature::{SignatureEncoding, Signer as SignatureSigner};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::claims::Claims;
use super::constants::{ISSUED_AT_BUFFER, TOKEN_DELIMITER};
use super::keys::{decode_private_key, PrivateKey};
use super::types::JwtHeader;

/// Encodes and signs `claims` as a compact RS256 token.
///
/// The header is `{"alg":"RS256","typ":"JWT"}` plus `kid` when `key_id` is given.
/// The signature is RSASSA-PKCS1-v1_5 over the SHA-256 digest of
/// `base64url(header) "." base64url(payload)`.
pub fn encode(
    claims: &Claims,
    key_id: Option<&str>,
    private_key: &PrivateKey,
) -> Result<String, Error> {
    let header = JwtHeader::rs256(key_id);
    let mut token = base64url::encode(&serde_json::to_vec(&header)?);
    token.push(TOKEN_DELIMITER);
    token.push_str(&base64url::encode(&serde_json::to_vec(claims)?));

    let signature = sign_rs256(private_key, token.as_bytes())?;
    token.push(TOKEN_DELIMITER);
    token.push_str(&base64url::encode(&signature));
    Ok(token)
}

fn sign_rs256(private_key: &PrivateKey, signing_input: &[u8]) -> Result<Vec<u8>, Error> {
    let sig = private_key
        .signing_key()
        .try_sign(signing_input)
        .map_err(|e| Error::Signing(format!("rsa signing error: {e}")))?;
    Ok(sig.to_vec())
}

/// Encode-side configuration: the claims to issue plus how the time-relative
/// ones are derived from the signing clock.
#[derive(Debug, Clone, Default)]
pub struct JwtBuilder {
    issuer: Option<String>,
    subject: Option<String>,
    audience: Option<String>,
    token_id: Option<String>,
    not_before: Option<u64>,
    key_id: Option<String>,
    issued_at_now: bool,
    expires_in: Option<Duration>,
}

impl JwtBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issuer claim. An empty value clears it.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = non_empty(issuer.into());
        self
    }

    /// Sets the subject claim. An empty value clears it.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = non_empty(subject.into());
        self
    }

    /// Sets the audience claim. An empty value clears it.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = non_empty(audience.into());
        self
    }

    /// Sets the unique token identifier (`jti`). An empty value clears it.
    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = non_empty(token_id.into());
        self
    }

    /// Sets an absolute not-before time. Zero clears it.
    pub fn with_not_before(mut self, not_before: u64) -> Self {
        self.not_before = (not_before > 0).then_some(not_before);
        self
    }

    /// Sets the `kid` header. An empty value clears it.
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = non_empty(key_id.into());
        self
    }

    /// Stamps `iat` at signing time, backdated by a small skew buffer.
    pub fn with_issued_at_now(mut self, issued_at_now: bool) -> Self {
        self.issued_at_now = issued_at_now;
        self
    }

    /// Stamps `exp` this long after signing time. A zero duration clears it.
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = (!expires_in.is_zero()).then_some(expires_in);
        self
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Resolves the claim set as it would be issued at `now`.
    pub fn claims_at(&self, now: u64) -> Claims {
        Claims {
            issuer: self.issuer.clone(),
            subject: self.subject.clone(),
            audience: self.audience.clone(),
            token_id: self.token_id.clone(),
            issued_at: self
                .issued_at_now
                .then(|| now.saturating_sub(ISSUED_AT_BUFFER.as_secs())),
            expires_at: self
                .expires_in
                .map(|expires_in| now.saturating_add(expires_in.as_secs())),
            not_before: self.not_before,
        }
    }

    /// Signs a token using the provided private key PEM.
    pub fn sign(&self, private_key_pem: &[u8]) -> Result<String, Error> {
        let key = decode_private_key(private_key_pem)?;
        self.sign_with_key(&key)
    }

    /// Signs a token with an already decoded key, using the system clock.
    pub fn sign_with_key(&self, private_key: &PrivateKey) -> Result<String, Error> {
        self.sign_at(private_key, unix_time_now())
    }

    /// Signs a token as of `now`.
    pub fn sign_at(&self, private_key: &PrivateKey, now: u64) -> Result<String, Error> {
        encode(&self.claims_at(now), self.key_id(), private_key)
    }
}

pub(super) fn unix_time_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

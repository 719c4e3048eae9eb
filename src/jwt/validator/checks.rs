use crate::error::Error;
use rsa::pkcs1v15::Signature as RsaSignature;
use signature::Verifier as SignatureVerifier;

use super::super::claims::Claims;
use super::super::constants::RS256_ALG;
use super::super::keys::PublicKey;
use super::super::types::{JwtHeader, JwtValidationOptions};

/// The verifier pins RS256; the header never selects the algorithm.
pub(super) fn validate_alg(header: &JwtHeader) -> Result<(), Error> {
    if header.alg == RS256_ALG {
        Ok(())
    } else {
        Err(Error::AlgorithmMismatch(header.alg.clone()))
    }
}

pub(super) fn verify_rs256(
    key: &PublicKey,
    signing_input: &str,
    signature: &[u8],
) -> Result<(), Error> {
    let sig = RsaSignature::try_from(signature)
        .map_err(|e| Error::SignatureInvalid(format!("rsa signature parse error: {e}")))?;
    key.verifying_key()
        .verify(signing_input.as_bytes(), &sig)
        .map_err(|e| Error::SignatureInvalid(format!("rsa signature verify error: {e}")))
}

/// `exp` fails once `now >= exp + leeway`; `nbf` fails while `now + leeway < nbf`.
pub(super) fn validate_time_bounds(
    claims: &Claims,
    options: &JwtValidationOptions,
    now: u64,
) -> Result<(), Error> {
    if options.validate_exp {
        if let Some(exp) = claims.expires_at {
            if now >= exp.saturating_add(options.leeway) {
                return Err(Error::TokenExpired { exp, now });
            }
        }
    }

    if options.validate_nbf {
        if let Some(nbf) = claims.not_before {
            if now.saturating_add(options.leeway) < nbf {
                return Err(Error::TokenNotYetValid { nbf, now });
            }
        }
    }

    if let (Some(skew), Some(iat)) = (options.max_issued_at_skew, claims.issued_at) {
        if iat > now.saturating_add(skew) {
            return Err(Error::TokenIssuedInFuture { iat, now });
        }
    }

    Ok(())
}

pub(super) fn validate_expected_claims(
    claims: &Claims,
    options: &JwtValidationOptions,
) -> Result<(), Error> {
    if let Some(ref expected) = options.issuer {
        match claims.issuer.as_deref() {
            Some(actual) if actual == expected => {}
            Some(actual) => {
                return Err(Error::ClaimMismatch(format!(
                    "issuer mismatch: expected {expected}, got {actual}"
                )));
            }
            None => return Err(Error::ClaimMismatch("token missing issuer".to_string())),
        }
    }

    if !options.audience.is_empty() {
        match claims.audience.as_deref() {
            Some(actual) if options.audience.iter().any(|aud| aud == actual) => {}
            Some(actual) => {
                return Err(Error::ClaimMismatch(format!(
                    "audience not accepted: {actual}"
                )));
            }
            None => return Err(Error::ClaimMismatch("token missing audience".to_string())),
        }
    }

    Ok(())
}

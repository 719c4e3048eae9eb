#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("key format error: {0}")]
    KeyFormat(String),
    #[error("key parse error: {0}")]
    KeyParse(String),
    #[error("unsupported key type: {0}")]
    KeyType(String),
    #[error("signing error: {0}")]
    Signing(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid signature: {0}")]
    SignatureInvalid(String),
    #[error("algorithm mismatch: expected RS256, got {0}")]
    AlgorithmMismatch(String),
    #[error("token expired: exp={exp} now={now}")]
    TokenExpired { exp: u64, now: u64 },
    #[error("token not yet valid: nbf={nbf} now={now}")]
    TokenNotYetValid { nbf: u64, now: u64 },
    #[error("token issued in the future: iat={iat} now={now}")]
    TokenIssuedInFuture { iat: u64, now: u64 },
    #[error("claim mismatch: {0}")]
    ClaimMismatch(String),
}

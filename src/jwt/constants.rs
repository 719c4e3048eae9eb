use std::time::Duration;

/// The only signing algorithm issued or accepted.
pub const RS256_ALG: &str = "RS256";
pub(super) const JWT_TYPE: &str = "JWT";
/// Header `typ` values accepted on decode, compared ignoring ASCII case.
pub(super) const ACCEPTED_JWT_TYPES: &[&str] = &[JWT_TYPE, "at+jwt"];
/// `iat` is stamped this far in the past to absorb clock skew between issuer and verifier.
pub(super) const ISSUED_AT_BUFFER: Duration = Duration::from_secs(10);
pub(super) const TOKEN_DELIMITER: char = '.';
pub(super) const TOKEN_SEGMENTS: usize = 3;

pub(super) const PEM_RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";
pub(super) const PEM_PRIVATE_KEY: &str = "PRIVATE KEY";
pub(super) const PEM_PUBLIC_KEY: &str = "PUBLIC KEY";
pub(super) const PEM_RSA_PUBLIC_KEY: &str = "RSA PUBLIC KEY";
pub(super) const PEM_FOREIGN_PRIVATE_KEYS: &[&str] =
    &["EC PRIVATE KEY", "DSA PRIVATE KEY", "OPENSSH PRIVATE KEY"];

#![forbid(unsafe_code)]

mod base64url;
mod error;
mod jwt;

pub use error::Error;

pub use jwt::{
    decode_header, decode_private_key, decode_public_key, encode, verify, verify_with_options,
    Claims, JwtBuilder, JwtHeader, JwtTokenData, JwtValidationOptions, JwtValidator, PrivateKey,
    PublicKey, RS256_ALG,
};

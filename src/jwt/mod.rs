mod claims;
mod constants;
mod keys;
mod token;
mod types;
mod validator;

pub use claims::Claims;
pub use constants::RS256_ALG;
pub use keys::{decode_private_key, decode_public_key, PrivateKey, PublicKey};
pub use token::{encode, JwtBuilder};
pub use types::{JwtHeader, JwtTokenData, JwtValidationOptions};
pub use validator::{decode_header, verify, verify_with_options, JwtValidator};

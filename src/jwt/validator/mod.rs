mod checks;
mod core;
mod helpers;

pub use self::core::{decode_header, verify, verify_with_options, JwtValidator};

use rs256_jwt::JwtValidator;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let token = match env::var("JWT_TOKEN") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("JWT_TOKEN is not set. Skipping.");
            eprintln!("Example: JWT_TOKEN='eyJ...' cargo run --example verify_jwt");
            return Ok(ExitCode::SUCCESS);
        }
    };
    let key_path = match env::var("JWT_PUBLIC_KEY_FILE") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("JWT_PUBLIC_KEY_FILE is not set. Skipping.");
            eprintln!("Example: JWT_PUBLIC_KEY_FILE=/path/public.pem (or - for stdin)");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let public_key_pem = if key_path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(key_path)?
    };
    let validator = JwtValidator::new_with_public_key(&public_key_pem)?;

    match validator.validate(token.trim()) {
        Ok(data) => {
            println!("Token is valid");
            if let Some(kid) = data.key_id() {
                println!("kid: {kid}");
            }
            if let Some(subject) = data.claims.subject.as_deref() {
                println!("sub: {subject}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("invalid token: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

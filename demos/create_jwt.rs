use rs256_jwt::JwtBuilder;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let key_path = match env::var("JWT_PRIVATE_KEY_FILE") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("JWT_PRIVATE_KEY_FILE is not set. Skipping.");
            eprintln!(
                "Example: JWT_PRIVATE_KEY_FILE=/path/private.pem JWT_SUBJECT=alice cargo run --example create_jwt"
            );
            eprintln!("Use JWT_PRIVATE_KEY_FILE=- to read the key from stdin.");
            return Ok(());
        }
    };

    let private_key_pem = read_key(&key_path)?;
    let builder = JwtBuilder::new()
        .with_issuer(env_or_empty("JWT_ISSUER"))
        .with_subject(env_or_empty("JWT_SUBJECT"))
        .with_audience(env_or_empty("JWT_AUDIENCE"))
        .with_token_id(env_or_empty("JWT_ID"))
        .with_key_id(env_or_empty("JWT_KEY_ID"))
        .with_not_before(env_number("JWT_NOT_BEFORE")?)
        .with_issued_at_now(env_flag("JWT_ISSUED_AT_NOW"))
        .with_expires_in(Duration::from_secs(env_number("JWT_EXPIRES_IN_SECONDS")?));

    let token = builder.sign(&private_key_pem)?;
    println!("{token}");
    Ok(())
}

fn read_key(path: &str) -> io::Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path)
    }
}

fn env_or_empty(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

fn env_number(name: &str) -> Result<u64, Box<dyn std::error::Error>> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value
            .parse()
            .map_err(|e| format!("{name} must be a non-negative integer: {e}").into()),
        _ => Ok(0),
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

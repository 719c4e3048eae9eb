use crate::error::Error;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

pub(crate) fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decodes unpadded base64url, rejecting padding, foreign alphabets and
/// non-canonical trailing bits.
pub(crate) fn decode(input: &str) -> Result<Vec<u8>, Error> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    if len % 4 == 1 {
        return Err(base64url_error("invalid length"));
    }

    for (idx, &b) in bytes.iter().enumerate() {
        if b == b'=' {
            return Err(base64url_error("padding is not allowed"));
        }
        if base64url_value(b).is_none() {
            return Err(base64url_error(&format!("invalid character at index {idx}")));
        }
    }

    if let Some(&last) = bytes.last() {
        let value = base64url_value(last)
            .ok_or_else(|| base64url_error("invalid trailing character"))?;
        let unused_bits = match len % 4 {
            2 => value & 0x0f,
            3 => value & 0x03,
            _ => 0,
        };
        if unused_bits != 0 {
            return Err(base64url_error("invalid trailing bits"));
        }
    }

    URL_SAFE_NO_PAD
        .decode(bytes)
        .map_err(|e| base64url_error(&e.to_string()))
}

fn base64url_value(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'-' => Some(62),
        b'_' => Some(63),
        _ => None,
    }
}

fn base64url_error(message: &str) -> Error {
    Error::Decode(format!("base64url decode error: {message}"))
}

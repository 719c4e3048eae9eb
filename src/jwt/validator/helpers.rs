use crate::base64url;
use crate::error::Error;
use serde_json::Value;

use super::super::claims::Claims;
use super::super::constants::{ACCEPTED_JWT_TYPES, TOKEN_DELIMITER, TOKEN_SEGMENTS};
use super::super::types::JwtHeader;

pub(super) struct JwtParts<'a> {
    pub(super) header: &'a str,
    pub(super) payload: &'a str,
    pub(super) signature: &'a str,
    /// `header "." payload` exactly as received.
    pub(super) signing_input: &'a str,
}

pub(super) fn split_jwt(token: &str) -> Result<JwtParts<'_>, Error> {
    let segments: Vec<&str> = token.split(TOKEN_DELIMITER).collect();
    if segments.len() != TOKEN_SEGMENTS {
        return Err(Error::MalformedToken(format!(
            "expected {TOKEN_SEGMENTS} segments, got {}",
            segments.len()
        )));
    }
    if let Some(idx) = segments.iter().position(|segment| segment.is_empty()) {
        return Err(Error::MalformedToken(format!("segment {idx} is empty")));
    }

    let (header, payload, signature) = (segments[0], segments[1], segments[2]);
    let signing_input = &token[..header.len() + 1 + payload.len()];
    Ok(JwtParts {
        header,
        payload,
        signature,
        signing_input,
    })
}

pub(super) fn decode_jwt_header(encoded: &str) -> Result<JwtHeader, Error> {
    let header_bytes = base64url::decode(encoded).map_err(|e| in_segment("header", e))?;
    let raw: Value = serde_json::from_slice(&header_bytes)
        .map_err(|e| Error::Decode(format!("header json error: {e}")))?;
    let Value::Object(raw) = raw else {
        return Err(Error::Decode("header is not a json object".to_string()));
    };

    if raw.contains_key("crit") {
        return Err(Error::Decode(
            "header declares unsupported critical extensions".to_string(),
        ));
    }
    let alg = match raw.get("alg") {
        Some(Value::String(alg)) => alg.clone(),
        Some(_) => return Err(Error::Decode("header alg is not a string".to_string())),
        None => return Err(Error::Decode("header is missing alg".to_string())),
    };
    let typ = optional_string(&raw, "typ")?;
    if let Some(ref typ) = typ {
        if !ACCEPTED_JWT_TYPES
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(typ))
        {
            return Err(Error::Decode(format!("unsupported header typ: {typ}")));
        }
    }
    let kid = optional_string(&raw, "kid")?;

    Ok(JwtHeader { alg, typ, kid })
}

pub(super) fn decode_jwt_claims(encoded: &str) -> Result<Claims, Error> {
    let payload_bytes = base64url::decode(encoded).map_err(|e| in_segment("payload", e))?;
    // serde would otherwise map a json array onto the fields positionally
    if payload_bytes.trim_ascii_start().first() != Some(&b'{') {
        return Err(Error::Decode("payload is not a json object".to_string()));
    }
    serde_json::from_slice(&payload_bytes)
        .map_err(|e| Error::Decode(format!("payload json error: {e}")))
}

pub(super) fn decode_jwt_signature(encoded: &str) -> Result<Vec<u8>, Error> {
    base64url::decode(encoded).map_err(|e| in_segment("signature", e))
}

fn optional_string(
    raw: &serde_json::Map<String, Value>,
    name: &str,
) -> Result<Option<String>, Error> {
    match raw.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(Error::Decode(format!("header {name} is not a string"))),
    }
}

fn in_segment(segment: &str, err: Error) -> Error {
    match err {
        Error::Decode(message) => Error::Decode(format!("{segment}: {message}")),
        other => other,
    }
}

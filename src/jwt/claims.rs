use serde::{Deserialize, Serialize};

/// Registered claims carried in the token payload.
///
/// Absent fields are omitted from the serialized payload rather than written as
/// zero or empty values. Timestamps are UTC seconds since the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<u64>,
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<u64>,
}

impl Claims {
    /// Returns true when `exp` is present and `now` has reached it.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }

    /// Returns true when `now` falls within `[nbf, exp)`, treating absent bounds as open.
    pub fn is_active_at(&self, now: u64) -> bool {
        let started = self.not_before.is_none_or(|nbf| now >= nbf);
        started && !self.is_expired_at(now)
    }
}

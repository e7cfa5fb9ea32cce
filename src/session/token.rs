//! Client-side JWT introspection.
//!
//! This is an expiry hint only: the signature is not checked and the backend
//! stays authoritative. Every malformed input maps to an invalid inspection
//! rather than an error.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64ct::{Base64, Base64Unpadded, Base64Url, Base64UrlUnpadded, Encoding};
use serde_json::{Map, Value};

/// Result of decoding a bearer token's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInspection {
    /// True iff the payload decoded and `exp` lies in the future.
    pub valid: bool,
    /// The `exp` claim in seconds since the epoch, when readable.
    pub exp: Option<i64>,
}

impl TokenInspection {
    const INVALID: Self = Self { valid: false, exp: None };
}

/// Decode `token` and compare its `exp` claim with `now_secs`.
pub fn inspect_token(token: &str, now_secs: i64) -> TokenInspection {
    let Some(claims) = decode_claims(token) else {
        return TokenInspection::INVALID;
    };
    let Some(exp) = claims.get("exp").and_then(exp_seconds) else {
        return TokenInspection::INVALID;
    };
    TokenInspection { valid: exp > now_secs, exp: Some(exp) }
}

/// Decode the middle segment of a three-part JWT into its claim object.
pub fn decode_claims(token: &str) -> Option<Map<String, Value>> {
    let mut segments = token.trim().split('.');
    let (Some(header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return None;
    };
    if header.is_empty() || payload.is_empty() {
        return None;
    }

    let bytes = decode_segment(payload)?;
    match serde_json::from_slice(&bytes).ok()? {
        Value::Object(claims) => Some(claims),
        _ => None,
    }
}

/// JWTs use unpadded base64url, but some issuers pad or use the standard
/// alphabet; accept all four encodings.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    Base64UrlUnpadded::decode_vec(segment)
        .or_else(|_| Base64Url::decode_vec(segment))
        .or_else(|_| Base64Unpadded::decode_vec(segment))
        .or_else(|_| Base64::decode_vec(segment))
        .ok()
}

#[allow(clippy::cast_possible_truncation)]
fn exp_seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
}

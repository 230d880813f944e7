//! Bearer-token gate for mutating routes.
//!
//! Tokens are HS256 JWTs signed with the process secret. Verification is a
//! pass/fail check; the subject claim becomes the `last_updated_by` audit
//! value.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use lambda_http::Request;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify an HS256 token and return its subject, or `None` if the token is
/// malformed, has a bad signature, or is expired.
pub fn verify_token(token: &str, secret: &str) -> Option<String> {
    let mut parts = token.split('.');
    let header = parts.next()?;
    let payload = parts.next()?;
    let signature = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let given = URL_SAFE_NO_PAD.decode(signature).ok()?;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac.verify_slice(&given).ok()?;

    let claims: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).ok()?).ok()?;
    if let Some(exp) = claims.get("exp").and_then(|v| v.as_i64()) {
        if exp < Utc::now().timestamp() {
            return None;
        }
    }
    claims.get("sub")?.as_str().map(|s| s.to_string())
}

/// Extract and verify the `Authorization: Bearer` token of a request.
pub fn authorized_user(event: &Request, secret: &str) -> Option<String> {
    let header = event.headers().get("Authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    verify_token(token, secret)
}

/// Issue a token for the given subject. Used by the ops tooling and tests.
pub fn issue_token(sub: &str, expires_at: i64, secret: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({"sub": sub, "exp": expires_at})
            .to_string()
            .as_bytes(),
    );

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{header}.{payload}.{signature}")
}

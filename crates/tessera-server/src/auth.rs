//! Bearer tokens and the cross-subdomain auth cookie.
//!
//! Tokens are a keyed SHA-256 MAC over a JSON claims payload:
//! `base64url(claims) "." base64url(sha256(secret "." base64url(claims)))`.
//! Signature comparison is constant-time. The signer is a plain value struct
//! constructed with its secret; nothing here is process-global.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Name of the cookie carrying the bearer credential between the main
/// domain and tenant subdomains.
pub const AUTH_COOKIE: &str = "authToken";

/// Secondary cookie name accepted for compatibility.
pub const TOKEN_COOKIE: &str = "token";

/// Cookie lifetime: 7 days.
const COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Signed token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the operator identity the token was issued to.
    pub sub: String,
    /// Expiry as Unix seconds.
    pub exp: i64,
}

/// Token verification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("malformed token")]
    Malformed,
    #[error("bad token signature")]
    BadSignature,
    #[error("expired token")]
    Expired,
}

/// Issues and verifies bearer tokens against a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    /// Create a signer for `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a token for `subject` valid for `ttl_secs` from now.
    #[must_use]
    pub fn issue(&self, subject: &str, ttl_secs: i64) -> String {
        let claims = Claims {
            sub: subject.to_owned(),
            exp: Utc::now().timestamp() + ttl_secs,
        };
        // Claims are a struct of two plain fields; serialization cannot fail.
        let payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap_or_default());
        let signature = URL_SAFE_NO_PAD.encode(self.mac(&payload));
        format!("{payload}.{signature}")
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::Malformed)?;

        let presented = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::Malformed)?;
        let expected = self.mac(payload);
        if expected.ct_eq(&presented).unwrap_u8() == 0 {
            return Err(AuthError::BadSignature);
        }

        let raw = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::Malformed)?;
        let claims: Claims = serde_json::from_slice(&raw).map_err(|_| AuthError::Malformed)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self, payload: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b".");
        hasher.update(payload.as_bytes());
        hasher.finalize().to_vec()
    }
}

/// Build the `Set-Cookie` value for the cross-subdomain auth cookie.
///
/// Scoped to `.{base_domain}` (leading dot, shared across subdomains),
/// http-only, `SameSite=Lax`, 7-day expiry, `Secure` when the public scheme
/// is https.
#[must_use]
pub fn auth_cookie(token: &str, base_domain: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{AUTH_COOKIE}={token}; Domain=.{base_domain}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extract a cookie's value from a `Cookie` request header.
#[must_use]
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// Extract a query parameter's value from a raw query string.
#[must_use]
pub fn query_value(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// A token resolved from an inbound tenant request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    pub token: String,
    /// Whether an `authToken` cookie already existed on the request. When it
    /// did not, the middleware sets one on the response.
    pub had_auth_cookie: bool,
}

/// Resolve the auth token from a request's cookies and query string.
///
/// Priority order: `authToken` cookie, `token` cookie, `token` query
/// parameter - except that `preserve_auth=true` together with an
/// `auth_token` query parameter overrides all of them (the cross-domain
/// handoff case).
#[must_use]
pub fn resolve_token(cookie_header: Option<&str>, query: Option<&str>) -> Option<ResolvedToken> {
    let cookie_header = cookie_header.unwrap_or_default();
    let query = query.unwrap_or_default();

    let auth_cookie = cookie_value(cookie_header, AUTH_COOKIE);
    let had_auth_cookie = auth_cookie.is_some();

    if query_value(query, "preserve_auth").as_deref() == Some("true")
        && let Some(token) = query_value(query, "auth_token")
    {
        return Some(ResolvedToken {
            token,
            had_auth_cookie,
        });
    }

    auth_cookie
        .or_else(|| cookie_value(cookie_header, TOKEN_COOKIE))
        .or_else(|| query_value(query, "token"))
        .map(|token| ResolvedToken {
            token,
            had_auth_cookie,
        })
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! HS256 token signing and verification.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use super::{claims::TokenClaims, AuthError, AuthenticatedUser};

/// Token lifetime (1 hour). There is no refresh; clients request a new one.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Shared-secret signing keys for bearer tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
        }
    }

    /// Sign `claims` with fresh `iat`/`exp`, replacing any the caller sent.
    pub fn issue(&self, claims: Map<String, Value>) -> Result<String, AuthError> {
        self.issue_at(claims, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(
        &self,
        mut claims: Map<String, Value>,
        now: i64,
    ) -> Result<String, AuthError> {
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert("exp".to_string(), Value::from(now + TOKEN_TTL_SECS));

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::InternalError(format!("token signing failed: {e}")))
    }

    /// Verify signature and expiry, then extract the caller identity.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        let token_data = decode::<TokenClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            }
        })?;

        AuthenticatedUser::from_claims(token_data.claims).ok_or(AuthError::MissingIdentity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn issued_token_verifies() {
        let keys = TokenKeys::from_secret(b"test-secret");
        let token = keys.issue(claims(json!({ "email": "a@example.com" }))).unwrap();

        let user = keys.verify(&token).unwrap();
        assert_eq!(user.email, "a@example.com");
        assert!(user.expires_at > Utc::now().timestamp());
    }

    #[test]
    fn issue_overrides_client_expiry() {
        let keys = TokenKeys::from_secret(b"test-secret");
        let now = Utc::now().timestamp();
        let token = keys
            .issue_at(claims(json!({ "email": "a@example.com", "exp": 1 })), now)
            .unwrap();

        let user = keys.verify(&token).unwrap();
        assert_eq!(user.expires_at, now + TOKEN_TTL_SECS);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenKeys::from_secret(b"one")
            .issue(claims(json!({ "email": "a@example.com" })))
            .unwrap();

        let result = TokenKeys::from_secret(b"two").verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::from_secret(b"test-secret");
        let two_hours_ago = Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        let token = keys
            .issue_at(claims(json!({ "email": "a@example.com" })), two_hours_ago)
            .unwrap();

        assert!(matches!(keys.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn token_without_email_is_rejected() {
        let keys = TokenKeys::from_secret(b"test-secret");
        let token = keys.issue(claims(json!({ "name": "anon" }))).unwrap();

        assert!(matches!(keys.verify(&token), Err(AuthError::MissingIdentity)));
    }

    #[test]
    fn garbage_is_malformed() {
        let keys = TokenKeys::from_secret(b"test-secret");
        assert!(matches!(
            keys.verify("not-a-token"),
            Err(AuthError::MalformedToken)
        ));
    }
}

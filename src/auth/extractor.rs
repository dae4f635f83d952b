// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Axum extractors for authenticated callers.
//!
//! Use the `Auth` extractor in handlers to require a valid bearer token,
//! and `AdminOnly` to additionally require the stored `admin` role:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user.email is the verified caller
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;
use crate::storage::UserRepository;

/// Extractor for authenticated users.
///
/// Validates the HS256 token from the `Authorization: Bearer` header.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // A previous extractor on the same request may have verified already
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::InvalidAuthHeader)?;

        let user = state.tokens.verify(token)?;
        parts.extensions.insert(user.clone());

        Ok(Auth(user))
    }
}

/// Extractor that requires the caller's stored role to be admin.
///
/// Costs one user lookup per request.
pub struct AdminOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        let stored = UserRepository::new(&state.db)
            .find_by_email(&user.email)
            .map_err(|e| AuthError::InternalError(format!("user lookup failed: {e}")))?;

        match stored {
            Some(record) if record.is_admin() => Ok(AdminOnly(user)),
            _ => {
                tracing::debug!(email = %user.email, "admin route refused");
                Err(AuthError::InsufficientPermissions)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegisterUserRequest;
    use crate::state::tests::test_state;
    use axum::http::Request;
    use serde_json::json;

    fn parts_with(header: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn bearer(state: &AppState, email: &str) -> String {
        let claims = json!({ "email": email }).as_object().cloned().unwrap();
        format!("Bearer {}", state.tokens.issue(claims).unwrap())
    }

    fn register(state: &AppState, email: &str) -> String {
        let repo = UserRepository::new(&state.db);
        repo.register(RegisterUserRequest {
            email: email.to_string(),
            name: None,
            photo_url: None,
        })
        .unwrap();
        repo.find_by_email(email).unwrap().unwrap().id
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let (state, _dir) = test_state();
        let mut parts = parts_with(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_other_schemes() {
        let (state, _dir) = test_state();
        let mut parts = parts_with(Some("Basic abc".to_string()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_signed_token() {
        let (state, _dir) = test_state();
        let mut parts = parts_with(Some(bearer(&state, "a@example.com")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.email, "a@example.com");
    }

    #[tokio::test]
    async fn admin_only_requires_header() {
        let (state, _dir) = test_state();
        let mut parts = parts_with(None);

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn admin_only_rejects_non_admin() {
        let (state, _dir) = test_state();
        register(&state, "plain@example.com");
        let mut parts = parts_with(Some(bearer(&state, "plain@example.com")));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }

    #[tokio::test]
    async fn admin_only_rejects_unknown_user() {
        let (state, _dir) = test_state();
        let mut parts = parts_with(Some(bearer(&state, "ghost@example.com")));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }

    #[tokio::test]
    async fn admin_only_accepts_stored_admin() {
        let (state, _dir) = test_state();
        let id = register(&state, "boss@example.com");
        UserRepository::new(&state.db).make_admin(&id).unwrap();
        let mut parts = parts_with(Some(bearer(&state, "boss@example.com")));

        let AdminOnly(user) = AdminOnly::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.email, "boss@example.com");
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Bearer token issuing.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::{error::ApiError, models::TokenResponse, state::AppState};

/// Sign the posted claims into a one-hour bearer token.
///
/// `iat` and `exp` are always set by the server.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = Object,
    responses(
        (status = 200, description = "Signed token", body = TokenResponse),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Value::Object(claims) = body else {
        return Err(ApiError::bad_request("Token claims must be a JSON object"));
    };

    let token = state.tokens.issue(claims).map_err(|e| {
        tracing::error!(error = %e, "Failed to sign token");
        ApiError::internal("Failed to issue token")
    })?;

    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::test_state;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn issued_token_verifies_with_same_keys() {
        let (state, _dir) = test_state();

        let Json(response) = issue_token(
            State(state.clone()),
            Json(json!({ "email": "a@example.com", "exp": 1 })),
        )
        .await
        .unwrap();

        let user = state.tokens.verify(&response.token).unwrap();
        assert_eq!(user.email, "a@example.com");
    }

    #[tokio::test]
    async fn non_object_body_is_rejected() {
        let (state, _dir) = test_state();

        let err = issue_token(State(state), Json(json!(["a@example.com"])))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims read back from a verified token.
///
/// Tokens carry whatever object the client asked us to sign; only the
/// fields below are interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Caller identity
    #[serde(default)]
    pub email: Option<String>,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

/// Authenticated caller extracted from a verified token.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Email the token was issued for
    pub email: String,

    /// Token expiration (Unix timestamp)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Build from verified claims; tokens without an email are rejected
    /// by the caller.
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        let email = claims.email?.trim().to_string();
        if email.is_empty() {
            return None;
        }
        Some(Self {
            email,
            expires_at: claims.exp,
        })
    }

    /// Whether the token was issued for `email`.
    pub fn is(&self, email: &str) -> bool {
        self.email == email.trim()
    }
}

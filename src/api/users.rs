// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! User endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::{
    auth::{AdminOnly, Auth},
    error::{parse_id, ApiError},
    models::{
        AdminStatusResponse, InsertOneResult, RegisterUserRequest, RegisterUserResponse,
        UpdateResult, User,
    },
    state::AppState,
    storage::{Registration, UserRepository},
};

/// List every registered user.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepository::new(&state.db).list_all()?;
    Ok(Json(users))
}

/// Register a user. Idempotent per email: a known email returns the stored
/// record untouched.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "Existing user or insert result", body = RegisterUserResponse)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<RegisterUserResponse>, ApiError> {
    let response = match UserRepository::new(&state.db).register(request)? {
        Registration::Existing(user) => RegisterUserResponse::Existing(user),
        Registration::Created(user) => {
            info!(email = %user.email, user_id = %user.id, "User registered");
            RegisterUserResponse::Created(InsertOneResult::new(user.id))
        }
    };
    Ok(Json(response))
}

/// Whether the caller holds the admin role.
///
/// Callers may only ask about themselves.
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    security(("bearer" = [])),
    params(("email" = String, Path, description = "Caller's email")),
    responses(
        (status = 200, description = "Admin flag", body = AdminStatusResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Email does not match the token")
    )
)]
pub async fn admin_status(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, ApiError> {
    if !user.is(&email) {
        return Err(ApiError::forbidden("forbidden access"));
    }

    let admin = UserRepository::new(&state.db)
        .find_by_email(&email)?
        .is_some_and(|record| record.is_admin());

    Ok(Json(AdminStatusResponse { admin }))
}

/// Grant the admin role to a user.
#[utoipa::path(
    patch,
    path = "/users/admin/{id}",
    tag = "Users",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Update result", body = UpdateResult),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn make_admin(
    State(state): State<AppState>,
    AdminOnly(admin): AdminOnly,
    Path(id): Path<String>,
) -> Result<Json<UpdateResult>, ApiError> {
    let user_id = parse_id(&id)?;
    let result = UserRepository::new(&state.db).make_admin(user_id)?;
    info!(user_id, granted_by = %admin.email, modified = result.modified_count, "Admin role granted");
    Ok(Json(result))
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Pet catalog endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::{
    error::{parse_id, ApiError},
    models::{
        CreatePetRequest, DeleteResult, EmailQuery, InsertOneResult, Pet, PetSortQuery,
        UpdatePetRequest, UpdateResult,
    },
    state::AppState,
    storage::PetRepository,
};

#[utoipa::path(
    get,
    path = "/pets",
    tag = "Pets",
    responses((status = 200, description = "All pets", body = [Pet]))
)]
pub async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<Pet>>, ApiError> {
    Ok(Json(PetRepository::new(&state.db).list_all()?))
}

/// Pets currently owned by the given email.
#[utoipa::path(
    get,
    path = "/pets/myPets",
    tag = "Pets",
    params(EmailQuery),
    responses((status = 200, description = "Owner's pets", body = [Pet]))
)]
pub async fn list_my_pets(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Pet>>, ApiError> {
    Ok(Json(PetRepository::new(&state.db).list_by_owner(&query.email)?))
}

/// Pets still up for adoption, sorted descending by the requested field.
#[utoipa::path(
    get,
    path = "/pets/isNotAdopted",
    tag = "Pets",
    params(PetSortQuery),
    responses(
        (status = 200, description = "Unadopted pets", body = [Pet]),
        (status = 400, description = "Unknown sort field")
    )
)]
pub async fn list_unadopted_pets(
    State(state): State<AppState>,
    Query(query): Query<PetSortQuery>,
) -> Result<Json<Vec<Pet>>, ApiError> {
    Ok(Json(PetRepository::new(&state.db).list_unadopted(query.sort)?))
}

/// One pet, or `null` when it does not exist.
#[utoipa::path(
    get,
    path = "/pets/{id}",
    tag = "Pets",
    params(("id" = String, Path, description = "Pet id")),
    responses(
        (status = 200, description = "The pet or null", body = Option<Pet>),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Pet>>, ApiError> {
    let pet_id = parse_id(&id)?;
    Ok(Json(PetRepository::new(&state.db).get(pet_id)?))
}

#[utoipa::path(
    post,
    path = "/pets",
    tag = "Pets",
    request_body = CreatePetRequest,
    responses((status = 200, description = "Insert result", body = InsertOneResult))
)]
pub async fn create_pet(
    State(state): State<AppState>,
    Json(request): Json<CreatePetRequest>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let pet = PetRepository::new(&state.db).create(request)?;
    info!(pet_id = %pet.id, owner = %pet.owner_email, "Pet listed");
    Ok(Json(InsertOneResult::new(pet.id)))
}

/// Partial update. Ownership and adoption state cannot be changed here.
#[utoipa::path(
    patch,
    path = "/pets/{id}",
    tag = "Pets",
    params(("id" = String, Path, description = "Pet id")),
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Update result", body = UpdateResult),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn update_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePetRequest>,
) -> Result<Json<UpdateResult>, ApiError> {
    let pet_id = parse_id(&id)?;
    Ok(Json(PetRepository::new(&state.db).update(pet_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/pets/{id}",
    tag = "Pets",
    params(("id" = String, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Delete result", body = DeleteResult),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let pet_id = parse_id(&id)?;
    let result = PetRepository::new(&state.db).delete(pet_id)?;
    info!(pet_id, deleted = result.deleted_count, "Pet removed");
    Ok(Json(result))
}

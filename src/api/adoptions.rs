// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Adoption request endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, warn};

use crate::{
    error::{parse_id, ApiError},
    models::{
        AdoptionCommand, AdoptionRequest, CreateAdoptionRequest, DeleteResult, EmailQuery,
        InsertOneResult, UpdateAdoptionRequest,
    },
    state::AppState,
    storage::AdoptionRepository,
};

#[utoipa::path(
    post,
    path = "/adoption",
    tag = "Adoption",
    request_body = CreateAdoptionRequest,
    responses(
        (status = 200, description = "Insert result", body = InsertOneResult),
        (status = 409, description = "Pet is already adopted")
    )
)]
pub async fn create_adoption_request(
    State(state): State<AppState>,
    Json(request): Json<CreateAdoptionRequest>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let adoption = AdoptionRepository::new(&state.db).create(request)?;
    info!(
        request_id = %adoption.id,
        pet_id = %adoption.pet_id,
        adopter = %adoption.adopter_email,
        "Adoption requested"
    );
    Ok(Json(InsertOneResult::new(adoption.id)))
}

/// Requests received for the given owner's pets.
#[utoipa::path(
    get,
    path = "/adoption/request",
    tag = "Adoption",
    params(EmailQuery),
    responses((status = 200, description = "Incoming requests", body = [AdoptionRequest]))
)]
pub async fn list_received_requests(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<AdoptionRequest>>, ApiError> {
    Ok(Json(AdoptionRepository::new(&state.db).list_by_owner(&query.email)?))
}

/// Requests filed by the given adopter.
#[utoipa::path(
    get,
    path = "/adoption/myRequest",
    tag = "Adoption",
    params(EmailQuery),
    responses((status = 200, description = "Outgoing requests", body = [AdoptionRequest]))
)]
pub async fn list_my_requests(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<AdoptionRequest>>, ApiError> {
    Ok(Json(AdoptionRepository::new(&state.db).list_by_adopter(&query.email)?))
}

/// Resolve a request.
///
/// `accept` hands the pet to the adopter and clears every request for that
/// pet; any other command removes only this request.
#[utoipa::path(
    put,
    path = "/adoption/update/{id}",
    tag = "Adoption",
    params(("id" = String, Path, description = "Adoption request id")),
    request_body = UpdateAdoptionRequest,
    responses(
        (status = 200, description = "Delete result", body = DeleteResult),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Request already resolved (accept only)"),
        (status = 409, description = "Pet is already adopted (accept only)")
    )
)]
pub async fn resolve_adoption_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateAdoptionRequest>,
) -> Result<Json<DeleteResult>, ApiError> {
    let request_id = parse_id(&id)?;
    let repo = AdoptionRepository::new(&state.db);

    let result = match update.command {
        AdoptionCommand::Accept => {
            let acceptance = repo.accept(request_id)?;
            if !acceptance.pet_updated {
                warn!(
                    request_id,
                    pet_id = %acceptance.request.pet_id,
                    "Accepted request references a missing pet"
                );
            }
            info!(
                request_id,
                pet_id = %acceptance.request.pet_id,
                adopter = %acceptance.request.adopter_email,
                cleared = acceptance.deleted.deleted_count,
                "Adoption accepted"
            );
            acceptance.deleted
        }
        AdoptionCommand::Reject(command) => {
            let result = repo.reject(request_id)?;
            info!(request_id, command = %command, deleted = result.deleted_count, "Adoption rejected");
            result
        }
    };

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::test_state;
    use crate::storage::repository::adoptions::tests::new_request;
    use crate::storage::repository::pets::tests::new_pet;
    use crate::storage::PetRepository;
    use axum::http::StatusCode;

    fn command(value: &str) -> Json<UpdateAdoptionRequest> {
        Json(serde_json::from_value(serde_json::json!({ "command": value })).unwrap())
    }

    #[tokio::test]
    async fn create_and_list_by_both_sides() {
        let (state, _dir) = test_state();
        create_adoption_request(
            State(state.clone()),
            Json(new_request("p1", "owner@example.com", "a@example.com")),
        )
        .await
        .unwrap();

        let Json(received) = list_received_requests(
            State(state.clone()),
            Query(EmailQuery {
                email: "owner@example.com".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(received.len(), 1);

        let Json(mine) = list_my_requests(
            State(state),
            Query(EmailQuery {
                email: "a@example.com".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].pet_id, "p1");
    }

    #[tokio::test]
    async fn accept_clears_competing_requests_and_transfers_pet() {
        let (state, _dir) = test_state();
        let pet = PetRepository::new(&state.db)
            .create(new_pet("owner@example.com", "Milo"))
            .unwrap();
        let repo = AdoptionRepository::new(&state.db);
        let chosen = repo
            .create(new_request(&pet.id, "owner@example.com", "a@example.com"))
            .unwrap();
        let rival = repo
            .create(new_request(&pet.id, "owner@example.com", "b@example.com"))
            .unwrap();

        let Json(result) =
            resolve_adoption_request(State(state.clone()), Path(chosen.id.clone()), command("accept"))
                .await
                .unwrap();
        assert_eq!(result, DeleteResult::new(2));

        let pet = PetRepository::new(&state.db).get(&pet.id).unwrap().unwrap();
        assert!(pet.adopted);
        assert_eq!(pet.owner_email, "a@example.com");

        let err = resolve_adoption_request(State(state), Path(rival.id), command("accept"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn adopted_pet_refuses_new_requests() {
        let (state, _dir) = test_state();
        let pet = PetRepository::new(&state.db)
            .create(new_pet("owner@example.com", "Milo"))
            .unwrap();
        let Json(first) = create_adoption_request(
            State(state.clone()),
            Json(new_request(&pet.id, "owner@example.com", "a@example.com")),
        )
        .await
        .unwrap();
        resolve_adoption_request(State(state.clone()), Path(first.inserted_id), command("accept"))
            .await
            .unwrap();

        let err = create_adoption_request(
            State(state.clone()),
            Json(new_request(&pet.id, "a@example.com", "b@example.com")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let pet = PetRepository::new(&state.db).get(&pet.id).unwrap().unwrap();
        assert_eq!(pet.owner_email, "a@example.com");
    }

    #[tokio::test]
    async fn any_other_command_rejects_single_request() {
        let (state, _dir) = test_state();
        let pet = PetRepository::new(&state.db)
            .create(new_pet("owner@example.com", "Milo"))
            .unwrap();
        let repo = AdoptionRepository::new(&state.db);
        let target = repo
            .create(new_request(&pet.id, "owner@example.com", "a@example.com"))
            .unwrap();
        repo.create(new_request(&pet.id, "owner@example.com", "b@example.com"))
            .unwrap();

        let Json(result) =
            resolve_adoption_request(State(state.clone()), Path(target.id.clone()), command("decline"))
                .await
                .unwrap();
        assert_eq!(result, DeleteResult::new(1));
        assert_eq!(repo.list_by_pet(&pet.id).unwrap().len(), 1);
        assert!(!PetRepository::new(&state.db).get(&pet.id).unwrap().unwrap().adopted);

        let Json(again) = resolve_adoption_request(State(state), Path(target.id), command("decline"))
            .await
            .unwrap();
        assert_eq!(again.deleted_count, 0);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Donation campaign endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::{
    error::{parse_id, ApiError},
    models::{
        CampaignSortQuery, CreateCampaignRequest, DonationCampaign, EmailQuery, InsertOneResult,
        UpdateCampaignRequest, UpdateResult,
    },
    state::AppState,
    storage::CampaignRepository,
};

/// All campaigns, sorted descending by the requested field.
#[utoipa::path(
    get,
    path = "/donationCampaign",
    tag = "Campaigns",
    params(CampaignSortQuery),
    responses(
        (status = 200, description = "All campaigns", body = [DonationCampaign]),
        (status = 400, description = "Unknown sort field")
    )
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<CampaignSortQuery>,
) -> Result<Json<Vec<DonationCampaign>>, ApiError> {
    Ok(Json(CampaignRepository::new(&state.db).list_all(query.sort)?))
}

#[utoipa::path(
    get,
    path = "/donationCampaign/myDonationCampaign",
    tag = "Campaigns",
    params(EmailQuery),
    responses((status = 200, description = "Owner's campaigns", body = [DonationCampaign]))
)]
pub async fn list_my_campaigns(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<DonationCampaign>>, ApiError> {
    Ok(Json(CampaignRepository::new(&state.db).list_by_owner(&query.email)?))
}

#[utoipa::path(
    get,
    path = "/donationCampaign/{id}",
    tag = "Campaigns",
    params(("id" = String, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "The campaign or null", body = Option<DonationCampaign>),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<DonationCampaign>>, ApiError> {
    let campaign_id = parse_id(&id)?;
    Ok(Json(CampaignRepository::new(&state.db).get(campaign_id)?))
}

#[utoipa::path(
    post,
    path = "/donationCampaign",
    tag = "Campaigns",
    request_body = CreateCampaignRequest,
    responses((status = 200, description = "Insert result", body = InsertOneResult))
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let campaign = CampaignRepository::new(&state.db).create(request)?;
    info!(
        campaign_id = %campaign.id,
        owner = %campaign.campaign_owner_email,
        amount = campaign.amount,
        "Campaign started"
    );
    Ok(Json(InsertOneResult::new(campaign.id)))
}

/// Pause or resume a campaign, or change its pet name or target amount.
#[utoipa::path(
    put,
    path = "/donationCampaign/{id}",
    tag = "Campaigns",
    params(("id" = String, Path, description = "Campaign id")),
    request_body = UpdateCampaignRequest,
    responses(
        (status = 200, description = "Update result", body = UpdateResult),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCampaignRequest>,
) -> Result<Json<UpdateResult>, ApiError> {
    let campaign_id = parse_id(&id)?;
    Ok(Json(CampaignRepository::new(&state.db).update(campaign_id, request)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CampaignSortField;
    use crate::state::tests::test_state;

    fn campaign(owner: &str, pet_name: &str, amount: f64) -> CreateCampaignRequest {
        CreateCampaignRequest {
            campaign_owner_email: owner.to_string(),
            pet_name: pet_name.to_string(),
            pet_image: None,
            amount,
            is_paused: None,
            last_date: Some("2026-12-31".to_string()),
            short_description: None,
            long_description: None,
        }
    }

    #[tokio::test]
    async fn listing_sorts_by_amount_descending() {
        let (state, _dir) = test_state();
        for (name, amount) in [("Milo", 50.0), ("Luna", 500.0), ("Rex", 5.0)] {
            create_campaign(State(state.clone()), Json(campaign("o@example.com", name, amount)))
                .await
                .unwrap();
        }

        let Json(campaigns) = list_campaigns(
            State(state),
            Query(CampaignSortQuery {
                sort: CampaignSortField::Amount,
            }),
        )
        .await
        .unwrap();
        let names: Vec<&str> = campaigns.iter().map(|c| c.pet_name.as_str()).collect();
        assert_eq!(names, ["Luna", "Milo", "Rex"]);
    }

    #[tokio::test]
    async fn pause_via_update_then_fetch() {
        let (state, _dir) = test_state();
        let Json(inserted) =
            create_campaign(State(state.clone()), Json(campaign("o@example.com", "Milo", 100.0)))
                .await
                .unwrap();

        let Json(result) = update_campaign(
            State(state.clone()),
            Path(inserted.inserted_id.clone()),
            Json(UpdateCampaignRequest {
                is_paused: Some(true),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(result, UpdateResult::matched(true));

        let Json(fetched) = get_campaign(State(state.clone()), Path(inserted.inserted_id))
            .await
            .unwrap();
        assert!(fetched.unwrap().is_paused);

        let Json(mine) = list_my_campaigns(
            State(state),
            Query(EmailQuery {
                email: "o@example.com".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(mine.len(), 1);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Donation ledger endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::{
    error::ApiError,
    models::{CreateDonationRequest, Donation, DonationReceipt, InsertOneResult},
    state::AppState,
    storage::DonationRepository,
};

#[utoipa::path(
    get,
    path = "/myDonation/{email}",
    tag = "Donations",
    params(("email" = String, Path, description = "Donor email")),
    responses((status = 200, description = "Donor's donations", body = [Donation]))
)]
pub async fn list_my_donations(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Donation>>, ApiError> {
    Ok(Json(DonationRepository::new(&state.db).list_by_donor(&email)?))
}

/// Record a donation. The payment itself is not verified server-side.
#[utoipa::path(
    post,
    path = "/myDonation",
    tag = "Donations",
    request_body = CreateDonationRequest,
    responses((status = 200, description = "Insert result", body = DonationReceipt))
)]
pub async fn record_donation(
    State(state): State<AppState>,
    Json(request): Json<CreateDonationRequest>,
) -> Result<Json<DonationReceipt>, ApiError> {
    let donation = DonationRepository::new(&state.db).record(request)?;
    info!(
        donation_id = %donation.id,
        campaign_id = %donation.campaign_id,
        amount = donation.amount,
        verified = donation.transaction_id.is_some(),
        "Donation recorded"
    );
    Ok(Json(DonationReceipt {
        donate_result: InsertOneResult::new(donation.id),
    }))
}

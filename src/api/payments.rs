// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Stripe payment intent endpoint.

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{PaymentIntentRequest, PaymentIntentResponse},
    payments::to_minor_units,
    state::AppState,
};

/// Create a card payment intent for a donation and hand the client secret
/// back to the browser.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret", body = PaymentIntentResponse),
        (status = 400, description = "Amount is not a positive number"),
        (status = 502, description = "Stripe rejected the request"),
        (status = 503, description = "Payments are not configured")
    )
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    let amount_in_minor = to_minor_units(request.amount)?;

    let client = state
        .payments
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Payments are not configured"))?;

    let client_secret = client.create_payment_intent(amount_in_minor).await?;
    Ok(Json(PaymentIntentResponse { client_secret }))
}

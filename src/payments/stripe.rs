// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Stripe PaymentIntents integration.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const CURRENCY: &str = "usd";
const PAYMENT_METHOD_TYPE: &str = "card";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    #[error("Stripe configuration invalid: {0}")]
    Config(String),

    #[error("amount must be a positive, finite number of dollars, got {0}")]
    InvalidAmount(f64),

    #[error("Stripe request failed: {0}")]
    Request(String),

    #[error("Stripe response was invalid: {0}")]
    InvalidResponse(String),
}

/// Convert a major-unit amount (dollars) to minor units (cents).
///
/// Rounds to the nearest cent so binary float noise (`19.99 * 100 =
/// 1998.999...`) does not lose a cent.
pub fn to_minor_units(amount: f64) -> Result<u64, StripeError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(StripeError::InvalidAmount(amount));
    }
    let cents = (amount * 100.0).round();
    if cents < 1.0 || cents >= u64::MAX as f64 {
        return Err(StripeError::InvalidAmount(amount));
    }
    Ok(cents as u64)
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: Option<String>,
}

/// Thin client for the PaymentIntents endpoint.
#[derive(Clone)]
pub struct StripeClient {
    api_base_url: String,
    secret_key: String,
    http: Client,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    pub fn new(
        secret_key: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Result<Self, StripeError> {
        let secret_key = secret_key.into();
        if secret_key.trim().is_empty() {
            return Err(StripeError::Config("secret key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StripeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url: api_base_url.into(),
            secret_key,
            http,
        })
    }

    /// Create a card PaymentIntent for `amount_in_minor` cents and return
    /// its client secret.
    pub async fn create_payment_intent(&self, amount_in_minor: u64) -> Result<String, StripeError> {
        let path = "/v1/payment_intents";
        let amount = amount_in_minor.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", CURRENCY),
            ("payment_method_types[]", PAYMENT_METHOD_TYPE),
        ];

        let response = self
            .http
            .post(format!(
                "{}{}",
                self.api_base_url.trim_end_matches('/'),
                path
            ))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| StripeError::Request(format!("POST {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StripeError::Request(format!(
                "POST {path} returned {status}: {body}"
            )));
        }

        let intent: PaymentIntentResponse = response
            .json()
            .await
            .map_err(|e| StripeError::InvalidResponse(format!("POST {path} invalid JSON: {e}")))?;

        info!(
            payment_intent = %intent.id,
            amount_in_minor,
            "Stripe payment intent created"
        );

        intent.client_secret.ok_or_else(|| {
            StripeError::InvalidResponse("missing client_secret in response".to_string())
        })
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::payments::StripeClient;
use crate::storage::PetSquadDb;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PetSquadDb>,
    pub tokens: TokenKeys,
    /// Absent when no Stripe key is configured.
    pub payments: Option<StripeClient>,
}

impl AppState {
    pub fn new(db: PetSquadDb, tokens: TokenKeys) -> Self {
        Self {
            db: Arc::new(db),
            tokens,
            payments: None,
        }
    }

    pub fn with_payments(mut self, client: StripeClient) -> Self {
        self.payments = Some(client);
        self
    }
}

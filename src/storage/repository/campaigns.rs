// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Donation campaign repository. Campaigns are never deleted; owners pause
//! them instead.

use chrono::Utc;

use super::new_id;
use crate::models::{
    CampaignSortField, CreateCampaignRequest, DonationCampaign, UpdateCampaignRequest,
    UpdateResult,
};
use crate::storage::database::{
    get_document, put_document, scan_documents, PetSquadDb, StoreResult, DONATION_CAMPAIGNS,
};

/// Repository for donation campaign operations.
pub struct CampaignRepository<'a> {
    db: &'a PetSquadDb,
}

impl<'a> CampaignRepository<'a> {
    /// Create a new CampaignRepository.
    pub fn new(db: &'a PetSquadDb) -> Self {
        Self { db }
    }

    /// Get a campaign by ID.
    pub fn get(&self, campaign_id: &str) -> StoreResult<Option<DonationCampaign>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DONATION_CAMPAIGNS)?;
        get_document(&table, campaign_id)
    }

    /// List all campaigns sorted descending by `sort`.
    pub fn list_all(&self, sort: CampaignSortField) -> StoreResult<Vec<DonationCampaign>> {
        self.list_where(|_| true, sort)
    }

    /// List campaigns started by `owner_email`.
    pub fn list_by_owner(&self, owner_email: &str) -> StoreResult<Vec<DonationCampaign>> {
        self.list_where(
            |campaign| campaign.campaign_owner_email == owner_email,
            CampaignSortField::CreatedAt,
        )
    }

    fn list_where<F>(
        &self,
        filter: F,
        sort: CampaignSortField,
    ) -> StoreResult<Vec<DonationCampaign>>
    where
        F: FnMut(&DonationCampaign) -> bool,
    {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DONATION_CAMPAIGNS)?;
        let mut campaigns: Vec<DonationCampaign> = scan_documents(&table, filter)?;
        campaigns.sort_by(|a, b| {
            let ordering = match sort {
                CampaignSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                CampaignSortField::Amount => a.amount.total_cmp(&b.amount),
                CampaignSortField::PetName => a.pet_name.cmp(&b.pet_name),
            };
            ordering.then_with(|| a.id.cmp(&b.id)).reverse()
        });
        Ok(campaigns)
    }

    /// Start a new campaign.
    pub fn create(&self, request: CreateCampaignRequest) -> StoreResult<DonationCampaign> {
        let campaign = DonationCampaign {
            id: new_id(),
            campaign_owner_email: request.campaign_owner_email,
            pet_name: request.pet_name,
            pet_image: request.pet_image,
            amount: request.amount,
            is_paused: request.is_paused.unwrap_or(false),
            last_date: request.last_date,
            short_description: request.short_description,
            long_description: request.long_description,
            created_at: Utc::now(),
        };

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DONATION_CAMPAIGNS)?;
            put_document(&mut table, &campaign.id, &campaign)?;
        }
        write_txn.commit()?;
        Ok(campaign)
    }

    /// Apply pause state, pet name and amount changes present in `update`.
    pub fn update(
        &self,
        campaign_id: &str,
        update: UpdateCampaignRequest,
    ) -> StoreResult<UpdateResult> {
        let write_txn = self.db.begin_write()?;
        let result = {
            let mut table = write_txn.open_table(DONATION_CAMPAIGNS)?;
            match get_document::<DonationCampaign, _>(&table, campaign_id)? {
                None => UpdateResult::unmatched(),
                Some(current) => {
                    let mut campaign = current.clone();
                    if let Some(is_paused) = update.is_paused {
                        campaign.is_paused = is_paused;
                    }
                    if let Some(pet_name) = update.pet_name {
                        campaign.pet_name = pet_name;
                    }
                    if let Some(amount) = update.amount {
                        campaign.amount = amount;
                    }
                    let modified = campaign != current;
                    if modified {
                        put_document(&mut table, campaign_id, &campaign)?;
                    }
                    UpdateResult::matched(modified)
                }
            }
        };
        write_txn.commit()?;
        Ok(result)
    }
}

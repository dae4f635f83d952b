// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Donation ledger. Append-only: there is no update or delete.

use chrono::Utc;

use super::new_id;
use crate::models::{CreateDonationRequest, Donation};
use crate::storage::database::{put_document, scan_documents, PetSquadDb, StoreResult, DONATIONS};

/// Repository for donation records.
pub struct DonationRepository<'a> {
    db: &'a PetSquadDb,
}

impl<'a> DonationRepository<'a> {
    /// Create a new DonationRepository.
    pub fn new(db: &'a PetSquadDb) -> Self {
        Self { db }
    }

    /// Donations made by `donor_email`, newest first.
    pub fn list_by_donor(&self, donor_email: &str) -> StoreResult<Vec<Donation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DONATIONS)?;
        let mut donations: Vec<Donation> =
            scan_documents(&table, |donation: &Donation| donation.donor_email == donor_email)?;
        donations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(donations)
    }

    /// Append a donation record.
    pub fn record(&self, request: CreateDonationRequest) -> StoreResult<Donation> {
        let donation = Donation {
            id: new_id(),
            donor_email: request.donor_email,
            donor_name: request.donor_name,
            campaign_id: request.campaign_id,
            amount: request.amount,
            pet_name: request.pet_name,
            pet_image: request.pet_image,
            transaction_id: request.transaction_id,
            created_at: Utc::now(),
        };

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DONATIONS)?;
            put_document(&mut table, &donation.id, &donation)?;
        }
        write_txn.commit()?;
        Ok(donation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::tests::temp_db;

    fn donation(donor: &str, amount: f64) -> CreateDonationRequest {
        CreateDonationRequest {
            donor_email: donor.to_string(),
            donor_name: None,
            campaign_id: "c1".to_string(),
            amount,
            pet_name: Some("Milo".to_string()),
            pet_image: None,
            transaction_id: Some("pi_123".to_string()),
        }
    }

    #[test]
    fn record_and_list_by_donor() {
        let (db, _dir) = temp_db();
        let repo = DonationRepository::new(&db);
        repo.record(donation("a@example.com", 10.0)).unwrap();
        repo.record(donation("a@example.com", 25.5)).unwrap();
        repo.record(donation("b@example.com", 5.0)).unwrap();

        let mine = repo.list_by_donor("a@example.com").unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|d| d.donor_email == "a@example.com"));
        assert!(repo.list_by_donor("c@example.com").unwrap().is_empty());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Repository layer providing typed access to the document store.
//!
//! Each repository provides the operations for one collection, borrowing
//! the shared [`PetSquadDb`](super::PetSquadDb) handle.

pub mod adoptions;
pub mod campaigns;
pub mod donations;
pub mod pets;
pub mod users;

pub use adoptions::{Acceptance, AdoptionRepository};
pub use campaigns::CampaignRepository;
pub use donations::DonationRepository;
pub use pets::PetRepository;
pub use users::{Registration, UserRepository};

/// Fresh document identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

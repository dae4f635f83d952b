// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! # Document Storage Module
//!
//! Persistent storage for every collection of the service, kept in a single
//! embedded redb file (`DATABASE_PATH`, default `./data/petsquad.redb`).
//!
//! ## Collections
//!
//! ```text
//! users               user id      -> User          (+ email -> id index)
//! pets                pet id       -> Pet
//! adoption_requests   request id   -> AdoptionRequest
//! donation_campaigns  campaign id  -> DonationCampaign
//! donations           donation id  -> Donation
//! ```
//!
//! ## Consistency
//!
//! Each repository call runs in its own redb transaction. Multi-document
//! changes (user registration with its email index, adoption acceptance)
//! happen inside one write transaction, so they are all-or-nothing and
//! serialized against each other.

pub mod database;
pub mod repository;

pub use database::{PetSquadDb, StoreError, StoreResult};
pub use repository::{
    Acceptance, AdoptionRepository, CampaignRepository, DonationRepository, PetRepository,
    Registration, UserRepository,
};

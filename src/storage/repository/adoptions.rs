// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Adoption request repository.
//!
//! A request is *pending* while its document exists. Resolving it removes
//! the document:
//!
//! - **accept**: the pet is marked adopted and handed to the adopter, and
//!   every request for that pet (from any adopter) is removed
//! - **reject**: only the targeted request is removed
//!
//! Acceptance runs in a single write transaction. redb serializes writers,
//! so a second accept for the same pet finds its request already gone.
//! A pet that is already adopted accepts no new requests, and accepting a
//! request for it fails with a conflict that leaves pet and request as they
//! were.

use chrono::Utc;

use super::new_id;
use crate::models::{AdoptionRequest, CreateAdoptionRequest, DeleteResult, Pet};
use crate::storage::database::{
    get_document, put_document, scan_documents, PetSquadDb, StoreError, StoreResult,
    ADOPTION_REQUESTS, PETS,
};

/// What an accepted request changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Acceptance {
    /// The request that was accepted (now deleted).
    pub request: AdoptionRequest,
    /// False when the referenced pet no longer exists.
    pub pet_updated: bool,
    /// Requests removed for the pet, the accepted one included.
    pub deleted: DeleteResult,
}

/// Repository for adoption request operations.
pub struct AdoptionRepository<'a> {
    db: &'a PetSquadDb,
}

impl<'a> AdoptionRepository<'a> {
    /// Create a new AdoptionRepository.
    pub fn new(db: &'a PetSquadDb) -> Self {
        Self { db }
    }

    /// Get a request by ID.
    pub fn get(&self, request_id: &str) -> StoreResult<Option<AdoptionRequest>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ADOPTION_REQUESTS)?;
        get_document(&table, request_id)
    }

    /// File a new pending request.
    ///
    /// Fails with `StoreError::Conflict` when the pet is already adopted.
    pub fn create(&self, request: CreateAdoptionRequest) -> StoreResult<AdoptionRequest> {
        let adoption = AdoptionRequest {
            id: new_id(),
            pet_id: request.pet_id,
            owner_email: request.owner_email,
            adopter_email: request.adopter_email,
            adopter_name: request.adopter_name,
            adopter_phone: request.adopter_phone,
            adopter_address: request.adopter_address,
            pet_name: request.pet_name,
            pet_image: request.pet_image,
            created_at: Utc::now(),
        };

        let write_txn = self.db.begin_write()?;
        {
            let pets = write_txn.open_table(PETS)?;
            if let Some(pet) = get_document::<Pet, _>(&pets, &adoption.pet_id)? {
                if pet.adopted {
                    return Err(already_adopted(&pet.id));
                }
            }
            let mut table = write_txn.open_table(ADOPTION_REQUESTS)?;
            put_document(&mut table, &adoption.id, &adoption)?;
        }
        write_txn.commit()?;
        Ok(adoption)
    }

    /// Requests received by a pet owner.
    pub fn list_by_owner(&self, owner_email: &str) -> StoreResult<Vec<AdoptionRequest>> {
        self.list_where(|request| request.owner_email == owner_email)
    }

    /// Requests filed by an adopter.
    pub fn list_by_adopter(&self, adopter_email: &str) -> StoreResult<Vec<AdoptionRequest>> {
        self.list_where(|request| request.adopter_email == adopter_email)
    }

    /// Requests referencing a pet.
    pub fn list_by_pet(&self, pet_id: &str) -> StoreResult<Vec<AdoptionRequest>> {
        self.list_where(|request| request.pet_id == pet_id)
    }

    fn list_where<F>(&self, filter: F) -> StoreResult<Vec<AdoptionRequest>>
    where
        F: FnMut(&AdoptionRequest) -> bool,
    {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ADOPTION_REQUESTS)?;
        let mut requests: Vec<AdoptionRequest> = scan_documents(&table, filter)?;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Accept a request: transfer the pet and clear all its requests.
    ///
    /// Returns `StoreError::NotFound` when the request no longer exists and
    /// `StoreError::Conflict` when the pet was already adopted; neither
    /// writes anything.
    pub fn accept(&self, request_id: &str) -> StoreResult<Acceptance> {
        let write_txn = self.db.begin_write()?;
        let acceptance = {
            let mut requests = write_txn.open_table(ADOPTION_REQUESTS)?;
            let mut pets = write_txn.open_table(PETS)?;

            let request: AdoptionRequest = get_document(&requests, request_id)?
                .ok_or_else(|| StoreError::NotFound(format!("Adoption request {request_id}")))?;

            let pet_updated = match get_document::<Pet, _>(&pets, &request.pet_id)? {
                Some(pet) if pet.adopted => return Err(already_adopted(&pet.id)),
                Some(mut pet) => {
                    pet.adopted = true;
                    pet.owner_email = request.adopter_email.clone();
                    put_document(&mut pets, &request.pet_id, &pet)?;
                    true
                }
                None => false,
            };

            let competing: Vec<String> =
                scan_documents(&requests, |other: &AdoptionRequest| {
                    other.pet_id == request.pet_id
                })?
                .into_iter()
                .map(|other| other.id)
                .collect();

            for id in &competing {
                requests.remove(id.as_str())?;
            }

            Acceptance {
                request,
                pet_updated,
                deleted: DeleteResult::new(competing.len() as u64),
            }
        };
        write_txn.commit()?;
        Ok(acceptance)
    }

    /// Reject a request: remove only that document.
    pub fn reject(&self, request_id: &str) -> StoreResult<DeleteResult> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(ADOPTION_REQUESTS)?;
            let removed = table.remove(request_id)?.is_some();
            removed
        };
        write_txn.commit()?;
        Ok(DeleteResult::new(u64::from(removed)))
    }
}

fn already_adopted(pet_id: &str) -> StoreError {
    StoreError::Conflict(format!("Pet {pet_id} is already adopted"))
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Pet repository.

use std::cmp::Ordering;

use chrono::Utc;

use super::new_id;
use crate::models::{
    CreatePetRequest, DeleteResult, Pet, PetSortField, UpdatePetRequest, UpdateResult,
};
use crate::storage::database::{
    get_document, put_document, scan_documents, PetSquadDb, StoreResult, PETS,
};

/// Repository for pet catalog operations.
pub struct PetRepository<'a> {
    db: &'a PetSquadDb,
}

impl<'a> PetRepository<'a> {
    /// Create a new PetRepository.
    pub fn new(db: &'a PetSquadDb) -> Self {
        Self { db }
    }

    /// Get a pet by ID.
    pub fn get(&self, pet_id: &str) -> StoreResult<Option<Pet>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PETS)?;
        get_document(&table, pet_id)
    }

    /// List every pet, newest first.
    pub fn list_all(&self) -> StoreResult<Vec<Pet>> {
        self.list_where(|_| true, PetSortField::CreatedAt)
    }

    /// List pets currently owned by `owner_email`.
    pub fn list_by_owner(&self, owner_email: &str) -> StoreResult<Vec<Pet>> {
        self.list_where(|pet| pet.owner_email == owner_email, PetSortField::CreatedAt)
    }

    /// List pets still up for adoption, sorted descending by `sort`.
    pub fn list_unadopted(&self, sort: PetSortField) -> StoreResult<Vec<Pet>> {
        self.list_where(|pet| !pet.adopted, sort)
    }

    fn list_where<F>(&self, filter: F, sort: PetSortField) -> StoreResult<Vec<Pet>>
    where
        F: FnMut(&Pet) -> bool,
    {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PETS)?;
        let mut pets = scan_documents(&table, filter)?;
        sort_pets_desc(&mut pets, sort);
        Ok(pets)
    }

    /// Insert a new pet. Pets start unadopted; only an accepted adoption
    /// request flips the flag.
    pub fn create(&self, request: CreatePetRequest) -> StoreResult<Pet> {
        let pet = Pet {
            id: new_id(),
            owner_email: request.owner_email,
            name: request.name,
            age: request.age,
            category: request.category,
            location: request.location,
            image: request.image,
            short_description: request.short_description,
            long_description: request.long_description,
            adopted: false,
            created_at: Utc::now(),
        };

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PETS)?;
            put_document(&mut table, &pet.id, &pet)?;
        }
        write_txn.commit()?;
        Ok(pet)
    }

    /// Apply the editable fields present in `update`.
    pub fn update(&self, pet_id: &str, update: UpdatePetRequest) -> StoreResult<UpdateResult> {
        let write_txn = self.db.begin_write()?;
        let result = {
            let mut table = write_txn.open_table(PETS)?;
            match get_document::<Pet, _>(&table, pet_id)? {
                None => UpdateResult::unmatched(),
                Some(current) => {
                    let mut pet = current.clone();
                    apply_update(&mut pet, update);
                    let modified = pet != current;
                    if modified {
                        put_document(&mut table, pet_id, &pet)?;
                    }
                    UpdateResult::matched(modified)
                }
            }
        };
        write_txn.commit()?;
        Ok(result)
    }

    /// Delete a pet. Pending adoption requests for it are left untouched.
    pub fn delete(&self, pet_id: &str) -> StoreResult<DeleteResult> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(PETS)?;
            let removed = table.remove(pet_id)?.is_some();
            removed
        };
        write_txn.commit()?;
        Ok(DeleteResult::new(u64::from(removed)))
    }
}

fn apply_update(pet: &mut Pet, update: UpdatePetRequest) {
    if let Some(image) = update.image {
        pet.image = Some(image);
    }
    if let Some(name) = update.name {
        pet.name = name;
    }
    if let Some(age) = update.age {
        pet.age = Some(age);
    }
    if let Some(category) = update.category {
        pet.category = Some(category);
    }
    if let Some(location) = update.location {
        pet.location = Some(location);
    }
    if let Some(short_description) = update.short_description {
        pet.short_description = Some(short_description);
    }
    if let Some(long_description) = update.long_description {
        pet.long_description = Some(long_description);
    }
}

/// Compare optional text, numerically when both sides parse as numbers.
/// Missing values sort lowest.
fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
            (Ok(x), Ok(y)) => x.total_cmp(&y),
            _ => a.cmp(b),
        },
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

fn sort_pets_desc(pets: &mut [Pet], sort: PetSortField) {
    pets.sort_by(|a, b| {
        let ordering = match sort {
            PetSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            PetSortField::Name => a.name.cmp(&b.name),
            PetSortField::Age => compare_text(a.age.as_deref(), b.age.as_deref()),
            PetSortField::Category => compare_text(a.category.as_deref(), b.category.as_deref()),
            PetSortField::Location => compare_text(a.location.as_deref(), b.location.as_deref()),
        };
        ordering.then_with(|| a.id.cmp(&b.id)).reverse()
    });
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::database::tests::temp_db;
    use crate::storage::repository::adoptions::tests::new_request;
    use crate::storage::AdoptionRepository;

    /// Adopt a pet the only way possible: file a request and accept it.
    pub(crate) fn adopt(db: &PetSquadDb, pet_id: &str) {
        let adoptions = AdoptionRepository::new(db);
        let request = adoptions
            .create(new_request(pet_id, "owner@example.com", "adopter@example.com"))
            .unwrap();
        adoptions.accept(&request.id).unwrap();
    }

    pub(crate) fn new_pet(owner: &str, name: &str) -> CreatePetRequest {
        CreatePetRequest {
            owner_email: owner.to_string(),
            name: name.to_string(),
            age: None,
            category: Some("cat".to_string()),
            location: None,
            image: None,
            short_description: None,
            long_description: None,
        }
    }

    #[test]
    fn create_and_get_pet() {
        let (db, _dir) = temp_db();
        let repo = PetRepository::new(&db);

        let pet = repo.create(new_pet("o@example.com", "Milo")).unwrap();
        assert!(!pet.adopted);
        assert_eq!(pet.owner_email, "o@example.com");

        let loaded = repo.get(&pet.id).unwrap().unwrap();
        assert_eq!(loaded, pet);
        assert!(repo.get("missing").unwrap().is_none());
    }

    #[test]
    fn list_by_owner_filters_correctly() {
        let (db, _dir) = temp_db();
        let repo = PetRepository::new(&db);
        repo.create(new_pet("a@example.com", "Milo")).unwrap();
        repo.create(new_pet("a@example.com", "Luna")).unwrap();
        repo.create(new_pet("b@example.com", "Rex")).unwrap();

        assert_eq!(repo.list_by_owner("a@example.com").unwrap().len(), 2);
        assert_eq!(repo.list_by_owner("b@example.com").unwrap().len(), 1);
        assert_eq!(repo.list_all().unwrap().len(), 3);
    }

    #[test]
    fn list_unadopted_excludes_adopted_pets() {
        let (db, _dir) = temp_db();
        let repo = PetRepository::new(&db);
        repo.create(new_pet("a@example.com", "Milo")).unwrap();
        let luna = repo.create(new_pet("a@example.com", "Luna")).unwrap();
        adopt(&db, &luna.id);

        let listed = repo.list_unadopted(PetSortField::CreatedAt).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Milo");
        assert!(listed.iter().all(|pet| !pet.adopted));
    }

    #[test]
    fn list_unadopted_sorts_descending() {
        let (db, _dir) = temp_db();
        let repo = PetRepository::new(&db);
        for (name, age) in [("Bella", "2"), ("Ace", "10"), ("Coco", "7")] {
            let mut request = new_pet("a@example.com", name);
            request.age = Some(age.to_string());
            repo.create(request).unwrap();
        }

        let by_name: Vec<String> = repo
            .list_unadopted(PetSortField::Name)
            .unwrap()
            .into_iter()
            .map(|pet| pet.name)
            .collect();
        assert_eq!(by_name, ["Coco", "Bella", "Ace"]);

        let by_age: Vec<String> = repo
            .list_unadopted(PetSortField::Age)
            .unwrap()
            .into_iter()
            .filter_map(|pet| pet.age)
            .collect();
        assert_eq!(by_age, ["10", "7", "2"]);

        let by_time = repo.list_unadopted(PetSortField::CreatedAt).unwrap();
        assert!(by_time
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[test]
    fn update_only_touches_present_fields() {
        let (db, _dir) = temp_db();
        let repo = PetRepository::new(&db);
        let pet = repo.create(new_pet("a@example.com", "Milo")).unwrap();

        let result = repo
            .update(
                &pet.id,
                UpdatePetRequest {
                    name: Some("Milo II".to_string()),
                    location: Some("Dhaka".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(result, UpdateResult::matched(true));

        let loaded = repo.get(&pet.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Milo II");
        assert_eq!(loaded.location.as_deref(), Some("Dhaka"));
        assert_eq!(loaded.category.as_deref(), Some("cat"));
        assert_eq!(loaded.owner_email, "a@example.com");

        let noop = repo.update(&pet.id, UpdatePetRequest::default()).unwrap();
        assert_eq!(noop, UpdateResult::matched(false));

        let missing = repo.update("missing", UpdatePetRequest::default()).unwrap();
        assert_eq!(missing, UpdateResult::unmatched());
    }

    #[test]
    fn delete_reports_count() {
        let (db, _dir) = temp_db();
        let repo = PetRepository::new(&db);
        let pet = repo.create(new_pet("a@example.com", "Milo")).unwrap();

        assert_eq!(repo.delete(&pet.id).unwrap().deleted_count, 1);
        assert_eq!(repo.delete(&pet.id).unwrap().deleted_count, 0);
        assert!(repo.get(&pet.id).unwrap().is_none());
    }
}

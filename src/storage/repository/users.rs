// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! User repository.
//!
//! Users are keyed by a generated id; the `user_email_index` table maps each
//! email to that id so registration stays idempotent per email.

use chrono::Utc;
use redb::ReadableTable;

use super::new_id;
use crate::auth::Role;
use crate::models::{RegisterUserRequest, UpdateResult, User};
use crate::storage::database::{
    get_document, put_document, scan_documents, PetSquadDb, StoreResult, USERS,
    USER_EMAIL_INDEX,
};

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The email was already registered; nothing was written.
    Existing(User),
    /// A new record was inserted.
    Created(User),
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    db: &'a PetSquadDb,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(db: &'a PetSquadDb) -> Self {
        Self { db }
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: &str) -> StoreResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        get_document(&table, user_id)
    }

    /// Look a user up by email.
    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(USER_EMAIL_INDEX)?;
        let user_id = match index.get(email.trim())? {
            Some(id) => id.value().to_string(),
            None => return Ok(None),
        };
        let table = read_txn.open_table(USERS)?;
        get_document(&table, &user_id)
    }

    /// List all users (admin view).
    pub fn list_all(&self) -> StoreResult<Vec<User>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        let mut users: Vec<User> = scan_documents(&table, |_| true)?;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    /// Register a user unless the email is already known.
    ///
    /// The index check and both inserts share one write transaction, so two
    /// concurrent registrations of the same email yield exactly one record.
    pub fn register(&self, request: RegisterUserRequest) -> StoreResult<Registration> {
        let write_txn = self.db.begin_write()?;
        let outcome = {
            let mut index = write_txn.open_table(USER_EMAIL_INDEX)?;
            let mut table = write_txn.open_table(USERS)?;

            let existing_id = index.get(request.email.as_str())?.map(|id| id.value().to_string());
            let existing: Option<User> = match existing_id {
                Some(id) => get_document(&table, &id)?,
                None => None,
            };

            match existing {
                Some(user) => Registration::Existing(user),
                None => {
                    let user = User {
                        id: new_id(),
                        email: request.email,
                        name: request.name,
                        photo_url: request.photo_url,
                        role: Role::User,
                        created_at: Utc::now(),
                    };
                    put_document(&mut table, &user.id, &user)?;
                    index.insert(user.email.as_str(), user.id.as_str())?;
                    Registration::Created(user)
                }
            }
        };
        write_txn.commit()?;
        Ok(outcome)
    }

    /// Grant the admin role.
    pub fn make_admin(&self, user_id: &str) -> StoreResult<UpdateResult> {
        let write_txn = self.db.begin_write()?;
        let result = {
            let mut table = write_txn.open_table(USERS)?;
            match get_document::<User, _>(&table, user_id)? {
                None => UpdateResult::unmatched(),
                Some(mut user) => {
                    let modified = user.role != Role::Admin;
                    if modified {
                        user.role = Role::Admin;
                        put_document(&mut table, user_id, &user)?;
                    }
                    UpdateResult::matched(modified)
                }
            }
        };
        write_txn.commit()?;
        Ok(result)
    }
}

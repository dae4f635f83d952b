// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Embedded document database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: user id → JSON document
//! - `user_email_index`: email → user id (natural key, unique)
//! - `pets`: pet id → JSON document
//! - `adoption_requests`: request id → JSON document
//! - `donation_campaigns`: campaign id → JSON document
//! - `donations`: donation id → JSON document
//!
//! Every collection stores serialized JSON bytes so documents stay readable
//! with any JSON tooling and tolerate added optional fields.

use std::path::Path;

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, Table, TableDefinition,
    WriteTransaction,
};
use serde::{de::DeserializeOwned, Serialize};

// =============================================================================
// Table Definitions
// =============================================================================

pub(crate) const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

pub(crate) const USER_EMAIL_INDEX: TableDefinition<&str, &str> =
    TableDefinition::new("user_email_index");

pub(crate) const PETS: TableDefinition<&str, &[u8]> = TableDefinition::new("pets");

pub(crate) const ADOPTION_REQUESTS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("adoption_requests");

pub(crate) const DONATION_CAMPAIGNS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("donation_campaigns");

pub(crate) const DONATIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("donations");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    /// The write would break a collection invariant.
    #[error("conflict: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Document Helpers
// =============================================================================

/// Read and decode one document from any readable table.
pub(crate) fn get_document<T, R>(table: &R, id: &str) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    R: ReadableTable<&'static str, &'static [u8]>,
{
    match table.get(id)? {
        Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
        None => Ok(None),
    }
}

/// Decode every document of a table, keeping those accepted by `filter`.
pub(crate) fn scan_documents<T, R, F>(table: &R, mut filter: F) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    R: ReadableTable<&'static str, &'static [u8]>,
    F: FnMut(&T) -> bool,
{
    let mut documents = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        let document: T = serde_json::from_slice(value.value())?;
        if filter(&document) {
            documents.push(document);
        }
    }
    Ok(documents)
}

/// Encode and store a document under `id`, replacing any previous version.
pub(crate) fn put_document<T: Serialize>(
    table: &mut Table<'_, &'static str, &'static [u8]>,
    id: &str,
    document: &T,
) -> StoreResult<()> {
    let json = serde_json::to_vec(document)?;
    table.insert(id, json.as_slice())?;
    Ok(())
}

// =============================================================================
// PetSquadDb
// =============================================================================

/// Handle to the embedded document database.
///
/// One instance is opened at startup and shared by every request handler;
/// dropping it releases the file lock.
pub struct PetSquadDb {
    db: Database,
}

impl PetSquadDb {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(USER_EMAIL_INDEX)?;
            let _ = write_txn.open_table(PETS)?;
            let _ = write_txn.open_table(ADOPTION_REQUESTS)?;
            let _ = write_txn.open_table(DONATION_CAMPAIGNS)?;
            let _ = write_txn.open_table(DONATIONS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    pub(crate) fn begin_read(&self) -> StoreResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    pub(crate) fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Cheap liveness probe: opens a read transaction and a table.
    pub fn ping(&self) -> StoreResult<()> {
        let read_txn = self.begin_read()?;
        let _ = read_txn.open_table(USERS)?;
        Ok(())
    }
}

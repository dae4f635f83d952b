// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! # API Data Models
//!
//! This module defines the documents kept in the store and the request and
//! response bodies of the REST API. All types derive `Serialize`/`Deserialize`
//! and `ToSchema` for JSON handling and OpenAPI documentation.
//!
//! ## Wire Compatibility
//!
//! The web client predates this server and expects:
//!
//! - camelCase field names
//! - document identifiers under `_id`
//! - write results shaped like `{ acknowledged, insertedId }`,
//!   `{ acknowledged, matchedCount, modifiedCount }` and
//!   `{ acknowledged, deletedCount }`
//!
//! Boolean flags (`adopted`, `isPaused`) used to travel as the strings
//! `"true"`/`"false"`; both spellings are accepted on input and JSON booleans
//! are always emitted.

use chrono::{DateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::Role;

// =============================================================================
// Lenient Field Decoding
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Text(String),
}

impl FlagRepr {
    fn into_bool<E: serde::de::Error>(self) -> Result<bool, E> {
        match self {
            FlagRepr::Bool(value) => Ok(value),
            FlagRepr::Text(text) => match text.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(E::custom(format!("expected a boolean, got {other:?}"))),
            },
        }
    }
}

fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    FlagRepr::deserialize(deserializer)?.into_bool()
}

fn opt_bool_or_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    Option::<FlagRepr>::deserialize(deserializer)?
        .map(FlagRepr::into_bool)
        .transpose()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Text(String),
    Number(serde_json::Number),
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<TextRepr>::deserialize(deserializer)?.map(|repr| match repr {
            TextRepr::Text(text) => text,
            TextRepr::Number(number) => number.to_string(),
        }),
    )
}

fn non_empty_email<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let email = String::deserialize(deserializer)?;
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(D::Error::custom("email must not be empty"));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// Write Results
// =============================================================================

/// Result of inserting one document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    /// Identifier assigned to the new document.
    pub inserted_id: String,
}

impl InsertOneResult {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

/// Result of updating at most one document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    /// Documents matched by the filter (0 or 1).
    pub matched_count: u64,
    /// Documents actually changed.
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
        }
    }

    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        }
    }
}

/// Result of deleting one or many documents.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

// =============================================================================
// Users
// =============================================================================

/// A registered user. Identity comes from the upstream identity provider;
/// the email is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[serde(deserialize_with = "non_empty_email")]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// `POST /users` answers with the stored record when the email is already
/// registered, otherwise with the insert result.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum RegisterUserResponse {
    Existing(User),
    Created(InsertOneResult),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

// =============================================================================
// Pets
// =============================================================================

/// A pet listed for adoption.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner_email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(deserialize_with = "bool_or_string")]
    pub adopted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    #[serde(deserialize_with = "non_empty_email")]
    pub owner_email: String,
    pub name: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    #[schema(value_type = Option<String>)]
    pub age: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
}

/// Editable pet fields. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    #[schema(value_type = Option<String>)]
    pub age: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
}

/// Fields the unadopted-pet listing may be sorted by (always descending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub enum PetSortField {
    #[default]
    #[serde(rename = "createdAt", alias = "date and time")]
    CreatedAt,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "location")]
    Location,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PetSortQuery {
    /// Sort key; defaults to creation time.
    #[serde(default)]
    pub sort: PetSortField,
}

// =============================================================================
// Adoption Requests
// =============================================================================

/// A pending claim on a pet by a prospective adopter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub pet_id: String,
    pub owner_email: String,
    pub adopter_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adopter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adopter_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adopter_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdoptionRequest {
    pub pet_id: String,
    #[serde(deserialize_with = "non_empty_email")]
    pub owner_email: String,
    #[serde(deserialize_with = "non_empty_email")]
    pub adopter_email: String,
    #[serde(default)]
    pub adopter_name: Option<String>,
    #[serde(default)]
    pub adopter_phone: Option<String>,
    #[serde(default)]
    pub adopter_address: Option<String>,
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub pet_image: Option<String>,
}

/// Owner decision on an adoption request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdoptionCommand {
    Accept,
    /// Any other command value resolves the request as rejected.
    Reject(String),
}

impl From<serde_json::Value> for AdoptionCommand {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) if text == "accept" => AdoptionCommand::Accept,
            serde_json::Value::String(text) => AdoptionCommand::Reject(text),
            serde_json::Value::Null => AdoptionCommand::Reject(String::new()),
            other => AdoptionCommand::Reject(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for AdoptionCommand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(serde_json::Value::deserialize(deserializer)?.into())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateAdoptionRequest {
    /// `"accept"` to accept; anything else rejects.
    #[serde(default = "reject_by_default")]
    #[schema(value_type = String)]
    pub command: AdoptionCommand,
}

fn reject_by_default() -> AdoptionCommand {
    AdoptionCommand::Reject(String::new())
}

// =============================================================================
// Donation Campaigns
// =============================================================================

/// A fundraising campaign for one pet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationCampaign {
    #[serde(rename = "_id")]
    pub id: String,
    pub campaign_owner_email: String,
    pub pet_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_image: Option<String>,
    /// Target amount in major currency units.
    pub amount: f64,
    #[serde(deserialize_with = "bool_or_string")]
    pub is_paused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[serde(deserialize_with = "non_empty_email")]
    pub campaign_owner_email: String,
    pub pet_name: String,
    #[serde(default)]
    pub pet_image: Option<String>,
    pub amount: f64,
    #[serde(default, deserialize_with = "opt_bool_or_string")]
    pub is_paused: Option<bool>,
    #[serde(default)]
    pub last_date: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
}

/// Editable campaign fields. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    #[serde(default, deserialize_with = "opt_bool_or_string")]
    pub is_paused: Option<bool>,
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Fields the campaign listing may be sorted by (always descending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub enum CampaignSortField {
    #[default]
    #[serde(rename = "createdAt", alias = "date and time")]
    CreatedAt,
    #[serde(rename = "amount")]
    Amount,
    #[serde(rename = "petName")]
    PetName,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignSortQuery {
    /// Sort key; defaults to creation time.
    #[serde(default)]
    pub sort: CampaignSortField,
}

// =============================================================================
// Donations
// =============================================================================

/// One contribution to a campaign. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    #[serde(rename = "_id")]
    pub id: String,
    pub donor_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    pub campaign_id: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_image: Option<String>,
    /// Processor reference supplied by the client, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    #[serde(deserialize_with = "non_empty_email")]
    pub donor_email: String,
    #[serde(default)]
    pub donor_name: Option<String>,
    pub campaign_id: String,
    pub amount: f64,
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub pet_image: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    pub donate_result: InsertOneResult,
}

// =============================================================================
// Shared Query / Misc
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Email to filter by.
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentIntentRequest {
    /// Amount in major currency units (e.g. 25.50).
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Pet Squad Server - Pet Adoption & Donation Backend
//!
//! REST backend for a pet adoption site: owners list pets, adopters file
//! requests, owners accept or reject them, and anyone can fund donation
//! campaigns through Stripe.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer tokens and the admin role check
//! - `payments` - Stripe payment intents
//! - `storage` - Embedded document store (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod payments;
pub mod state;
pub mod storage;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! # Authentication Module
//!
//! Bearer-token authentication for the Pet Squad API.
//!
//! ## Auth Flow
//!
//! 1. The web client signs the user in with the identity provider
//! 2. It relays the user object to `POST /jwt` and receives an HS256 token
//!    valid for one hour
//! 3. Protected requests send `Authorization: Bearer <token>`
//! 4. The server:
//!    - verifies signature and expiry (`Auth`)
//!    - for admin routes, looks up the stored user by the token's email and
//!      requires `role == "admin"` (`AdminOnly`)

pub mod claims;
pub mod error;
pub mod extractor;
pub mod roles;
pub mod token;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use roles::Role;
pub use token::TokenKeys;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

//! Payment processor integration.
//!
//! Donations are charged client-side with Stripe Elements; the server only
//! creates the PaymentIntent and hands its client secret to the browser.

pub mod stripe;

pub use stripe::{to_minor_units, StripeClient, StripeError};

// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Services module - business logic layer.

pub mod clock;
pub mod premium;

pub use clock::{Clock, ManualClock, SystemClock};
pub use premium::{PremiumGrant, PremiumPlan};

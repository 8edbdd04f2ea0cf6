// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Premium subscription plans and expiry rules.
//!
//! A user is either free or holds an active plan with a start and an optional
//! end. Weekly and monthly plans expire; lifetime never does. The flag-only
//! enable endpoint can also leave a user with `premium == true` and no plan,
//! which is treated like a non-expiring grant.

use crate::models::User;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const WEEKLY_DAYS: i64 = 7;
const MONTHLY_DAYS: i64 = 30;

/// Subscription plan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumPlan {
    Weekly,
    Monthly,
    Lifetime,
}

impl PremiumPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            PremiumPlan::Weekly => "weekly",
            PremiumPlan::Monthly => "monthly",
            PremiumPlan::Lifetime => "lifetime",
        }
    }

    /// How long the plan lasts, or `None` if it never expires.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            PremiumPlan::Weekly => Some(Duration::days(WEEKLY_DAYS)),
            PremiumPlan::Monthly => Some(Duration::days(MONTHLY_DAYS)),
            PremiumPlan::Lifetime => None,
        }
    }
}

impl fmt::Display for PremiumPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for plan codes outside weekly/monthly/lifetime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid plan: {0}")]
pub struct InvalidPlan(pub String);

impl FromStr for PremiumPlan {
    type Err = InvalidPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(PremiumPlan::Weekly),
            "monthly" => Ok(PremiumPlan::Monthly),
            "lifetime" => Ok(PremiumPlan::Lifetime),
            other => Err(InvalidPlan(other.to_string())),
        }
    }
}

/// The four premium fields written together on activation.
#[derive(Debug, Clone, PartialEq)]
pub struct PremiumGrant {
    pub plan: PremiumPlan,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl PremiumGrant {
    /// Grant `plan` starting at `now`.
    pub fn new(plan: PremiumPlan, now: DateTime<Utc>) -> Self {
        Self {
            plan,
            start: now,
            end: plan.duration().map(|d| now + d),
        }
    }
}

/// Whether the user's premium has run out at `now`.
///
/// Only a concrete end date can expire; an end exactly equal to `now` counts.
pub fn is_expired(user: &User, now: DateTime<Utc>) -> bool {
    user.premium && user.premium_end.is_some_and(|end| end <= now)
}

/// IDs of the users in `users` whose premium should be reset at `now`.
pub fn expired_user_ids(users: &[User], now: DateTime<Utc>) -> Vec<String> {
    users
        .iter()
        .filter(|user| is_expired(user, now))
        .filter_map(|user| user.id.clone())
        .collect()
}

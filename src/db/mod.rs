// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Database layer.
//!
//! Handlers talk to the [`UserStore`] trait; Firestore backs it in production
//! and [`MemoryStore`] backs it in tests and local runs.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::models::User;
use crate::services::premium::{PremiumGrant, PremiumPlan};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// Errors raised by a [`UserStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database not connected (offline mode)")]
    Offline,

    #[error("No document to update: {0}")]
    MissingDocument(String),

    #[error("{0}")]
    Backend(String),
}

/// Access to the `users` collection.
///
/// None of these operations are transactional across calls: registration's
/// "find by phone, then create" can race with a concurrent registration.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// First user whose `phone` equals `phone`.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, StoreError>;

    /// User by document ID.
    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user and return the generated document ID.
    async fn create_user(&self, user: &User) -> Result<String, StoreError>;

    /// Apply a partial update. Fails if the document does not exist.
    async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<(), StoreError>;

    /// All users with `premium == true`.
    async fn list_premium_users(&self) -> Result<Vec<User>, StoreError>;

    /// Reset premium fields on every listed user in a single atomic write.
    async fn reset_premiums(&self, ids: &[String]) -> Result<(), StoreError>;
}

/// A single partial update to a user document.
#[derive(Debug, Clone, PartialEq)]
pub enum UserUpdate {
    Age(i64),
    Weight(f64),
    Goal(String),
    Gender(String),
    /// Sets only the premium flag; plan fields are left alone.
    EnablePremium,
    ActivatePremium(PremiumGrant),
    ResetPremium,
}

const PREMIUM_FIELDS: &[&str] = &["premium", "premiumPlan", "premiumStart", "premiumEnd"];

impl UserUpdate {
    /// Document fields written by this update.
    pub fn field_mask(&self) -> &'static [&'static str] {
        match self {
            UserUpdate::Age(_) => &["age"],
            UserUpdate::Weight(_) => &["weight"],
            UserUpdate::Goal(_) => &["goal"],
            UserUpdate::Gender(_) => &["gender"],
            UserUpdate::EnablePremium => &["premium"],
            UserUpdate::ActivatePremium(_) | UserUpdate::ResetPremium => PREMIUM_FIELDS,
        }
    }

    /// Field values for this update. Only the masked fields are meaningful.
    pub fn to_patch(&self) -> UserPatch {
        let mut patch = UserPatch::default();
        match self {
            UserUpdate::Age(age) => patch.age = Some(*age),
            UserUpdate::Weight(weight) => patch.weight = Some(*weight),
            UserUpdate::Goal(goal) => patch.goal = Some(goal.clone()),
            UserUpdate::Gender(gender) => patch.gender = Some(gender.clone()),
            UserUpdate::EnablePremium => patch.premium = true,
            UserUpdate::ActivatePremium(grant) => {
                patch.premium = true;
                patch.premium_plan = Some(grant.plan);
                patch.premium_start = Some(grant.start);
                patch.premium_end = grant.end;
            }
            UserUpdate::ResetPremium => {}
        }
        patch
    }

    /// Apply the update to an in-memory copy of the document.
    pub fn apply(&self, user: &mut User) {
        match self {
            UserUpdate::Age(age) => user.age = Some(*age),
            UserUpdate::Weight(weight) => user.weight = Some(*weight),
            UserUpdate::Goal(goal) => user.goal = Some(goal.clone()),
            UserUpdate::Gender(gender) => user.gender = Some(gender.clone()),
            UserUpdate::EnablePremium => user.premium = true,
            UserUpdate::ActivatePremium(grant) => {
                user.premium = true;
                user.premium_plan = Some(grant.plan);
                user.premium_start = Some(grant.start);
                user.premium_end = grant.end;
            }
            UserUpdate::ResetPremium => {
                user.premium = false;
                user.premium_plan = None;
                user.premium_start = None;
                user.premium_end = None;
            }
        }
    }
}

/// Body for a masked partial update.
///
/// Masked `None` fields are written as Firestore nulls, not removed.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, with = "::firestore::serialize_as_null")]
    pub age: Option<i64>,
    #[serde(default, with = "::firestore::serialize_as_null")]
    pub weight: Option<f64>,
    #[serde(default, with = "::firestore::serialize_as_null")]
    pub goal: Option<String>,
    #[serde(default, with = "::firestore::serialize_as_null")]
    pub gender: Option<String>,
    #[serde(default)]
    pub premium: bool,
    #[serde(default, with = "::firestore::serialize_as_null")]
    pub premium_plan: Option<PremiumPlan>,
    #[serde(default, with = "::firestore::serialize_as_null")]
    pub premium_start: Option<DateTime<Utc>>,
    #[serde(default, with = "::firestore::serialize_as_null")]
    pub premium_end: Option<DateTime<Utc>>,
}

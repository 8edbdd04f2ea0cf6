// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! User model for storage and API.

use crate::services::premium::PremiumPlan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User document stored in the `users` collection.
///
/// Serialized in camelCase so stored documents and API responses share the
/// same field names. Unset optional fields are written as explicit nulls, both
/// in JSON and in the stored Firestore document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-generated document ID. Firestore fills it through `_firestore_id`.
    #[serde(
        alias = "_firestore_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    /// Used as the registration/login key. Uniqueness is only checked before insert.
    pub phone: String,
    /// Stored as plaintext for API compatibility. This is a known defect.
    pub password: String,
    #[serde(default, with = "firestore::serialize_as_null")]
    pub age: Option<i64>,
    #[serde(default, with = "firestore::serialize_as_null")]
    pub weight: Option<f64>,
    #[serde(default, with = "firestore::serialize_as_null")]
    pub goal: Option<String>,
    #[serde(default, with = "firestore::serialize_as_null")]
    pub gender: Option<String>,
    #[serde(default)]
    pub premium: bool,
    #[serde(default, with = "firestore::serialize_as_null")]
    pub premium_plan: Option<PremiumPlan>,
    #[serde(default, with = "firestore::serialize_as_null")]
    pub premium_start: Option<DateTime<Utc>>,
    /// `None` means "does not expire" only for the lifetime plan.
    #[serde(default, with = "firestore::serialize_as_null")]
    pub premium_end: Option<DateTime<Utc>>,
}

impl User {
    /// A freshly registered user: every optional field null, premium off.
    pub fn new(name: String, phone: String, password: String) -> Self {
        Self {
            id: None,
            name,
            phone,
            password,
            age: None,
            weight: None,
            goal: None,
            gender: None,
            premium: false,
            premium_plan: None,
            premium_start: None,
            premium_end: None,
        }
    }

    /// Attach the document ID after a read or insert.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

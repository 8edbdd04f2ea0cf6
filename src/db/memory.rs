// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! In-process user store.
//!
//! Mirrors the Firestore semantics the handlers rely on: generated IDs,
//! updates that fail on missing documents, and all-or-nothing premium resets.

use super::{StoreError, UserStore, UserUpdate};
use crate::models::User;
use async_trait::async_trait;
use dashmap::DashMap;
use rand::distributions::{Alphanumeric, DistString};

const ID_LEN: usize = 20;

/// Users held in a concurrent map keyed by document ID.
#[derive(Debug)]
pub struct MemoryStore {
    users: DashMap<String, User>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// 20 alphanumeric characters, the same shape as Firestore auto IDs.
    fn generate_id(&self) -> String {
        Alphanumeric.sample_string(&mut rand::thread_rng(), ID_LEN)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().phone == phone)
            .map(|entry| entry.value().clone()))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn create_user(&self, user: &User) -> Result<String, StoreError> {
        let id = loop {
            let candidate = self.generate_id();
            if !self.users.contains_key(&candidate) {
                break candidate;
            }
        };
        self.users
            .insert(id.clone(), user.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<(), StoreError> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| StoreError::MissingDocument(id.to_string()))?;
        update.apply(entry.value_mut());
        Ok(())
    }

    async fn list_premium_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .filter(|entry| entry.value().premium)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn reset_premiums(&self, ids: &[String]) -> Result<(), StoreError> {
        // Check every target first so a missing document leaves nothing changed.
        if let Some(missing) = ids.iter().find(|id| !self.users.contains_key(*id)) {
            return Err(StoreError::MissingDocument(missing.clone()));
        }
        for id in ids {
            if let Some(mut entry) = self.users.get_mut(id) {
                UserUpdate::ResetPremium.apply(entry.value_mut());
            }
        }
        Ok(())
    }
}

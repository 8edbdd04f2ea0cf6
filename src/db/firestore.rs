// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Firestore client wrapper implementing [`UserStore`].
//!
//! All users live in the `users` collection with Firestore-generated
//! document IDs. Partial updates use an update mask with an `exists`
//! precondition so updating an unknown ID fails instead of creating a
//! document.

use super::{collections, StoreError, UserStore, UserUpdate};
use crate::models::User;
use async_trait::async_trait;
use firestore::FirestoreWritePrecondition;
use std::path::Path;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

fn backend_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// Credentials come from `credentials_path` when given (a service-account
    /// key file), otherwise from the environment's default credentials.
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, credentials_path: Option<&Path>) -> Result<Self, StoreError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = match credentials_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using service account key file");
                firestore::FirestoreDb::with_options_service_account_key_file(
                    firestore::FirestoreDbOptions::new(project_id.to_string()),
                    path.to_path_buf(),
                )
                .await
            }
            None => firestore::FirestoreDb::new(project_id).await,
        }
        .map_err(|e| StoreError::Backend(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, StoreError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            StoreError::Backend(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, StoreError> {
        self.client.as_ref().ok_or(StoreError::Offline)
    }
}

#[async_trait]
impl UserStore for FirestoreDb {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("phone").eq(phone)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(backend_error)?;

        Ok(users.into_iter().next())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(id)
            .await
            .map_err(backend_error)
    }

    async fn create_user(&self, user: &User) -> Result<String, StoreError> {
        let created: User = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .generate_document_id()
            .object(user)
            .execute()
            .await
            .map_err(backend_error)?;

        created
            .id
            .ok_or_else(|| StoreError::Backend("Firestore returned no document ID".to_string()))
    }

    async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<(), StoreError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(update.field_mask().iter().copied())
            .in_col(collections::USERS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(id)
            .object(&update.to_patch())
            .execute()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn list_premium_users(&self) -> Result<Vec<User>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("premium").eq(true)]))
            .obj()
            .query()
            .await
            .map_err(backend_error)
    }

    async fn reset_premiums(&self, ids: &[String]) -> Result<(), StoreError> {
        if ids.is_empty() {
            return Ok(());
        }

        let client = self.get_client()?;
        let update = UserUpdate::ResetPremium;
        let patch = update.to_patch();

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to begin transaction: {}", e)))?;

        for id in ids {
            client
                .fluent()
                .update()
                .fields(update.field_mask().iter().copied())
                .in_col(collections::USERS)
                .precondition(FirestoreWritePrecondition::Exists(true))
                .document_id(id)
                .object(&patch)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    StoreError::Backend(format!("Failed to add reset to transaction: {}", e))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| StoreError::Backend(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(count = ids.len(), "Premium fields reset");
        Ok(())
    }
}

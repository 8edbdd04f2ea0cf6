// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Application configuration loaded from environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_PORT: u16 = 10000;
const DEFAULT_CREDENTIALS_FILE: &str = "serviceAccountKey.json";
const LOCAL_PROJECT_ID: &str = "local-dev";

/// Which [`crate::db::UserStore`] implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    /// In-process store; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// GCP project holding the Firestore database
    pub gcp_project_id: String,
    /// Service-account key file, if one is used
    pub credentials_path: Option<PathBuf>,
    pub store_backend: StoreBackend,
}

/// The only part of a service-account key file we read.
#[derive(Deserialize)]
struct ServiceAccountKey {
    project_id: String,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            gcp_project_id: "test-project".to_string(),
            credentials_path: None,
            store_backend: StoreBackend::Memory,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// - `PORT` (default 10000)
    /// - `STORE_BACKEND`: `firestore` (default) or `memory`
    /// - `GOOGLE_APPLICATION_CREDENTIALS` or `FIREBASE_CREDENTIALS`: key file path,
    ///   falling back to `serviceAccountKey.json` when it exists
    /// - `GCP_PROJECT_ID`, else the key file's `project_id`
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let store_backend = lookup("STORE_BACKEND")
            .map(|raw| raw.parse::<StoreBackend>())
            .transpose()?
            .unwrap_or(StoreBackend::Firestore);

        let credentials_path = lookup("GOOGLE_APPLICATION_CREDENTIALS")
            .or_else(|| lookup("FIREBASE_CREDENTIALS"))
            .map(PathBuf::from)
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CREDENTIALS_FILE);
                default.exists().then_some(default)
            });

        let gcp_project_id = match lookup("GCP_PROJECT_ID") {
            Some(id) => id,
            None => match &credentials_path {
                Some(path) => project_id_from_key_file(path)?,
                None if store_backend == StoreBackend::Memory
                    || lookup("FIRESTORE_EMULATOR_HOST").is_some() =>
                {
                    LOCAL_PROJECT_ID.to_string()
                }
                None => return Err(ConfigError::Missing("GCP_PROJECT_ID")),
            },
        };

        Ok(Self {
            port,
            gcp_project_id,
            credentials_path,
            store_backend,
        })
    }
}

/// Read `project_id` out of a service-account key file.
fn project_id_from_key_file(path: &Path) -> Result<String, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Credentials {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let key: ServiceAccountKey =
        serde_json::from_str(&raw).map_err(|e| ConfigError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(key.project_id)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("Unknown STORE_BACKEND: {0} (expected firestore or memory)")]
    UnknownBackend(String),

    #[error("Cannot read credentials file {}: {reason}", path.display())]
    Credentials { path: PathBuf, reason: String },
}

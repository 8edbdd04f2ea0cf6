// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Fiturai API: user accounts and premium subscriptions for the Fiturai app.
//!
//! This crate provides the HTTP backend for registration, login, profile
//! attributes and the premium subscription lifecycle, stored in Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::UserStore;
use services::Clock;
use std::sync::Arc;

/// Shared application state.
///
/// The store and clock are injected so tests can swap in
/// [`db::MemoryStore`] and [`services::ManualClock`].
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn UserStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn UserStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }
}

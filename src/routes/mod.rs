// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! HTTP route handlers.

pub mod attributes;
pub mod extract;
pub mod premium;
pub mod users;

use crate::db::UserUpdate;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Plaintext liveness message served at `/`.
pub const LIVENESS_MESSAGE: &str = "✅ Fiturai API is live (Firestore)";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// `{message, user}` body shared by login and every update endpoint.
#[derive(Debug, Serialize)]
pub struct UserMessageResponse {
    pub message: String,
    pub user: User,
}

impl UserMessageResponse {
    pub fn new(message: &str, user: User) -> Self {
        Self {
            message: message.to_string(),
            user,
        }
    }
}

/// Apply `update` to user `id`, then read the document back.
///
/// Store failures (including an unknown `id`) become a 500 carrying `failure`.
pub(crate) async fn update_and_fetch(
    state: &AppState,
    id: &str,
    update: UserUpdate,
    failure: &'static str,
) -> Result<User> {
    state
        .store
        .update_user(id, &update)
        .await
        .map_err(AppError::store(failure))?;

    state
        .store
        .get_user(id)
        .await
        .map_err(AppError::store(failure))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Any origin may call the API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .merge(users::routes())
        .merge(attributes::routes())
        .merge(premium::routes())
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

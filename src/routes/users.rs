// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Registration, login and profile routes.

use crate::error::{AppError, Result};
use crate::models::User;
use crate::routes::extract::{RequestBody, ValidatedJson};
use crate::routes::UserMessageResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile/{id}", get(profile))
}

// ─── Registration ────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

impl RequestBody for RegisterRequest {
    const REJECTION: &'static str = "Name, phone, and password are required";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

/// Create a user unless the phone number is already taken.
///
/// The existence check and the insert are separate store calls, so two
/// concurrent registrations with the same phone can both succeed.
async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    const FAILED: &str = "Server error during registration";

    tracing::info!(phone = %body.phone, "Registration request");

    let existing = state
        .store
        .find_by_phone(&body.phone)
        .await
        .map_err(AppError::store_with_details(FAILED))?;
    if existing.is_some() {
        tracing::info!(phone = %body.phone, "Phone already registered");
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let user = User::new(body.name, body.phone, body.password);
    let user_id = state
        .store
        .create_user(&user)
        .await
        .map_err(AppError::store_with_details(FAILED))?;

    tracing::info!(user_id = %user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registered successfully".to_string(),
            user_id,
        }),
    ))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

impl RequestBody for LoginRequest {
    const REJECTION: &'static str = "Phone and password are required";
}

/// Check the password for the user registered under `phone`.
///
/// No session or token is issued; clients carry the returned user ID.
async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<UserMessageResponse>> {
    let user = state
        .store
        .find_by_phone(&body.phone)
        .await
        .map_err(AppError::store("Server error during login"))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // TODO: hash passwords (argon2) at registration; plaintext compare is a known defect.
    if user.password != body.password {
        tracing::info!(user_id = ?user.id, "Login rejected: bad password");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    tracing::info!(user_id = ?user.id, "Login successful");
    Ok(Json(UserMessageResponse::new("Login successful", user)))
}

// ─── Profile ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
}

/// Full stored user document, password included.
async fn profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>> {
    let user = state
        .store
        .get_user(&id)
        .await
        .map_err(AppError::store("Server error fetching profile"))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse { user }))
}

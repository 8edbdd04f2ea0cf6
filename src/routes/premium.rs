// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Premium subscription routes.
//!
//! `/check-expired-premiums` is meant to be called by an external scheduler;
//! the service runs no timer of its own.

use crate::db::UserUpdate;
use crate::error::{AppError, Result};
use crate::routes::extract::{RequestBody, ValidatedJson};
use crate::routes::{update_and_fetch, UserMessageResponse};
use crate::services::premium::{expired_user_ids, PremiumGrant, PremiumPlan};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/enable-premium", post(enable_premium))
        .route("/activate-premium", post(activate_premium))
        .route("/check-expired-premiums", get(check_expired_premiums))
}

// ─── Flag-only enable ────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct EnablePremiumRequest {
    #[serde(rename = "_id", default)]
    #[validate(length(min = 1))]
    pub id: String,
}

impl RequestBody for EnablePremiumRequest {
    const REJECTION: &'static str = "User ID required";
}

/// Set `premium = true` without touching plan, start or end.
///
/// Leaves the user premium with no plan, a state activation never produces.
async fn enable_premium(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<EnablePremiumRequest>,
) -> Result<Json<UserMessageResponse>> {
    let user = update_and_fetch(
        &state,
        &body.id,
        UserUpdate::EnablePremium,
        "Error enabling premium",
    )
    .await?;
    Ok(Json(UserMessageResponse::new("Premium enabled", user)))
}

// ─── Plan activation ─────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct ActivatePremiumRequest {
    #[serde(rename = "_id", default)]
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub plan: String,
}

impl RequestBody for ActivatePremiumRequest {
    const REJECTION: &'static str = "User ID and plan required";
}

/// Start (or restart) a plan now. All four premium fields are written in one update.
async fn activate_premium(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<ActivatePremiumRequest>,
) -> Result<Json<UserMessageResponse>> {
    let plan: PremiumPlan = body.plan.parse().map_err(|e| {
        tracing::debug!(error = %e, "Rejected premium plan");
        AppError::BadRequest("Invalid plan".to_string())
    })?;

    let grant = PremiumGrant::new(plan, state.clock.now());
    tracing::info!(
        user_id = %body.id,
        plan = %plan,
        end = ?grant.end,
        "Activating premium"
    );

    let user = update_and_fetch(
        &state,
        &body.id,
        UserUpdate::ActivatePremium(grant),
        "Error activating premium",
    )
    .await?;
    Ok(Json(UserMessageResponse::new("Premium activated", user)))
}

// ─── Expiry sweep ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub message: String,
    pub modified: usize,
}

/// Demote every premium user whose end date has passed.
///
/// Users without an end date (lifetime or flag-only) are left alone. All
/// resets are committed together.
async fn check_expired_premiums(State(state): State<Arc<AppState>>) -> Result<Json<SweepResponse>> {
    const FAILED: &str = "Error checking expired premiums";

    let now = state.clock.now();
    let candidates = state
        .store
        .list_premium_users()
        .await
        .map_err(AppError::store(FAILED))?;

    let expired = expired_user_ids(&candidates, now);
    state
        .store
        .reset_premiums(&expired)
        .await
        .map_err(AppError::store(FAILED))?;

    tracing::info!(
        scanned = candidates.len(),
        modified = expired.len(),
        "Expired premium sweep complete"
    );

    Ok(Json(SweepResponse {
        message: "Expired premium users updated".to_string(),
        modified: expired.len(),
    }))
}

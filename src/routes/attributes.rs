// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Single-field profile updates: age, weight, goal and gender.

use crate::db::UserUpdate;
use crate::error::Result;
use crate::routes::extract::{RequestBody, ValidatedJson};
use crate::routes::{update_and_fetch, UserMessageResponse};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/update-age", post(update_age))
        .route("/update-weight", post(update_weight))
        .route("/update-goal", post(update_goal))
        .route("/update-gender", post(update_gender))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAgeRequest {
    #[serde(rename = "_id", default)]
    #[validate(length(min = 1))]
    pub id: String,
    /// Zero counts as missing; negative ages are stored as given.
    #[serde(default)]
    #[validate(custom(function = "non_zero_age"))]
    pub age: i64,
}

impl RequestBody for UpdateAgeRequest {
    const REJECTION: &'static str = "User ID and age required";
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWeightRequest {
    #[serde(rename = "_id", default)]
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    #[validate(custom(function = "non_zero_weight"))]
    pub weight: f64,
}

impl RequestBody for UpdateWeightRequest {
    const REJECTION: &'static str = "User ID and weight required";
}

fn non_zero_age(age: i64) -> std::result::Result<(), ValidationError> {
    if age == 0 {
        return Err(ValidationError::new("missing"));
    }
    Ok(())
}

fn non_zero_weight(weight: f64) -> std::result::Result<(), ValidationError> {
    if weight == 0.0 {
        return Err(ValidationError::new("missing"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGoalRequest {
    #[serde(rename = "_id", default)]
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub goal: String,
}

impl RequestBody for UpdateGoalRequest {
    const REJECTION: &'static str = "User ID and goal required";
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGenderRequest {
    #[serde(rename = "_id", default)]
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub gender: String,
}

impl RequestBody for UpdateGenderRequest {
    const REJECTION: &'static str = "User ID and gender required";
}

async fn update_age(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UpdateAgeRequest>,
) -> Result<Json<UserMessageResponse>> {
    let user = update_and_fetch(
        &state,
        &body.id,
        UserUpdate::Age(body.age),
        "Error updating age",
    )
    .await?;
    Ok(Json(UserMessageResponse::new("Age updated", user)))
}

async fn update_weight(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UpdateWeightRequest>,
) -> Result<Json<UserMessageResponse>> {
    let user = update_and_fetch(
        &state,
        &body.id,
        UserUpdate::Weight(body.weight),
        "Error updating weight",
    )
    .await?;
    Ok(Json(UserMessageResponse::new("Weight updated", user)))
}

async fn update_goal(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UpdateGoalRequest>,
) -> Result<Json<UserMessageResponse>> {
    let user = update_and_fetch(
        &state,
        &body.id,
        UserUpdate::Goal(body.goal),
        "Error updating goal",
    )
    .await?;
    Ok(Json(UserMessageResponse::new("Goal updated", user)))
}

async fn update_gender(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UpdateGenderRequest>,
) -> Result<Json<UserMessageResponse>> {
    let user = update_and_fetch(
        &state,
        &body.id,
        UserUpdate::Gender(body.gender),
        "Error updating gender",
    )
    .await?;
    Ok(Json(UserMessageResponse::new("Gender updated", user)))
}

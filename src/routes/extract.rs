// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! JSON body extractor that validates before the handler runs.

use crate::error::AppError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Request bodies declare the message returned when they are rejected.
pub trait RequestBody: DeserializeOwned + Validate {
    /// Client-facing message for a missing, empty or malformed body.
    const REJECTION: &'static str;
}

/// A deserialized and validated JSON body.
///
/// Malformed JSON, wrong field types and failed validation all become
/// `400 Bad Request` with the body's [`RequestBody::REJECTION`] message.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: RequestBody,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                AppError::BadRequest(T::REJECTION.to_string())
            })?;

        body.validate().map_err(|errors| {
            tracing::debug!(error = %errors, "Request body failed validation");
            AppError::BadRequest(T::REJECTION.to_string())
        })?;

        Ok(Self(body))
    }
}

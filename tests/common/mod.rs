// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use fiturai_api::config::Config;
use fiturai_api::db::{FirestoreDb, MemoryStore, UserStore};
use fiturai_api::routes::create_router;
use fiturai_api::services::ManualClock;
use fiturai_api::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection against the emulator.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project", None)
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// A test app wired to an in-memory store and a manual clock.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
}

/// Create a test app backed by [`MemoryStore`].
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
    ));
    let state = Arc::new(AppState::new(
        Config::test_default(),
        store.clone(),
        clock.clone(),
    ));

    TestApp {
        router: create_router(state),
        store,
        clock,
    }
}

/// Create a test app whose store is an offline Firestore mock (every call fails).
#[allow(dead_code)]
pub fn create_offline_test_app() -> Router {
    let store: Arc<dyn UserStore> = Arc::new(FirestoreDb::new_mock());
    let state = Arc::new(AppState::new(
        Config::test_default(),
        store,
        Arc::new(ManualClock::new(Utc::now())),
    ));
    create_router(state)
}

#[allow(dead_code)]
async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// POST a JSON body and return the status and parsed JSON response.
#[allow(dead_code)]
pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

/// GET a path and return the status and parsed JSON response.
#[allow(dead_code)]
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

/// Register a user and return the new user ID.
#[allow(dead_code)]
pub async fn register(router: &Router, name: &str, phone: &str, password: &str) -> String {
    let (status, json) = post_json(
        router,
        "/register",
        serde_json::json!({ "name": name, "phone": phone, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {json}");
    json["userId"].as_str().unwrap().to_string()
}

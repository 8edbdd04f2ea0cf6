// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Premium activation, flag-only enable and expiry sweep tests.

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use fiturai_api::db::UserStore;
use fiturai_api::services::{Clock, PremiumPlan};
use serde_json::{json, Value};

mod common;
use common::{create_test_app, get_json, post_json, register};

fn parse_time(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| panic!("not a timestamp: {value}"))
}

async fn activate(router: &axum::Router, id: &str, plan: &str) -> (StatusCode, Value) {
    post_json(router, "/activate-premium", json!({ "_id": id, "plan": plan })).await
}

#[tokio::test]
async fn test_plan_end_dates() {
    let app = create_test_app();
    let id = register(&app.router, "A", "555", "x").await;

    let expected = [("weekly", Some(604_800_000_i64)), ("monthly", Some(2_592_000_000)), ("lifetime", None)];

    for (plan, duration_ms) in expected {
        let (status, json) = activate(&app.router, &id, plan).await;
        assert_eq!(status, StatusCode::OK, "{plan}: {json}");
        assert_eq!(json["message"], "Premium activated");

        let user = &json["user"];
        assert_eq!(user["premium"], true);
        assert_eq!(user["premiumPlan"], plan);

        let start = parse_time(&user["premiumStart"]);
        assert_eq!(start, app.clock.now());

        match duration_ms {
            Some(ms) => {
                let end = parse_time(&user["premiumEnd"]);
                assert_eq!((end - start).num_milliseconds(), ms);
            }
            None => assert_eq!(user["premiumEnd"], Value::Null),
        }
    }
}

#[tokio::test]
async fn test_invalid_plan_leaves_user_unchanged() {
    let app = create_test_app();
    let id = register(&app.router, "A", "555", "x").await;
    activate(&app.router, &id, "monthly").await;
    let before = app.store.get_user(&id).await.unwrap().unwrap();

    let (status, json) = activate(&app.router, &id, "yearly").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid plan");
    assert_eq!(app.store.get_user(&id).await.unwrap().unwrap(), before);
}

#[tokio::test]
async fn test_activate_missing_fields() {
    let app = create_test_app();
    let id = register(&app.router, "A", "555", "x").await;

    for body in [json!({ "_id": id }), json!({ "plan": "weekly" }), json!({ "_id": id, "plan": "" })] {
        let (status, json) = post_json(&app.router, "/activate-premium", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "User ID and plan required");
    }
}

#[tokio::test]
async fn test_activate_unknown_user_is_server_error() {
    let app = create_test_app();

    let (status, json) = activate(&app.router, "ghost", "weekly").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Error activating premium");
}

#[tokio::test]
async fn test_reactivation_overwrites_plan() {
    let app = create_test_app();
    let id = register(&app.router, "A", "555", "x").await;

    activate(&app.router, &id, "weekly").await;
    app.clock.advance(Duration::days(2));
    let (_, json) = activate(&app.router, &id, "lifetime").await;

    assert_eq!(json["user"]["premiumPlan"], "lifetime");
    assert_eq!(json["user"]["premiumEnd"], Value::Null);
    assert_eq!(parse_time(&json["user"]["premiumStart"]), app.clock.now());
}

#[tokio::test]
async fn test_enable_premium_sets_flag_only() {
    let app = create_test_app();
    let id = register(&app.router, "A", "555", "x").await;

    let (status, json) = post_json(&app.router, "/enable-premium", json!({ "_id": id })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Premium enabled");
    assert_eq!(json["user"]["premium"], true);
    assert_eq!(json["user"]["premiumPlan"], Value::Null);
    assert_eq!(json["user"]["premiumEnd"], Value::Null);

    let (status, json) = post_json(&app.router, "/enable-premium", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "User ID required");
}

#[tokio::test]
async fn test_sweep_resets_only_expired_users() {
    let app = create_test_app();
    let weekly = register(&app.router, "W", "1", "x").await;
    let monthly = register(&app.router, "M", "2", "x").await;
    let lifetime = register(&app.router, "L", "3", "x").await;
    let flag_only = register(&app.router, "F", "4", "x").await;
    let free = register(&app.router, "N", "5", "x").await;

    activate(&app.router, &weekly, "weekly").await;
    activate(&app.router, &monthly, "monthly").await;
    activate(&app.router, &lifetime, "lifetime").await;
    post_json(&app.router, "/enable-premium", json!({ "_id": flag_only })).await;

    // Nothing has expired yet.
    let (status, json) = get_json(&app.router, "/check-expired-premiums").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["modified"], 0);

    app.clock.advance(Duration::days(8));

    let (status, json) = get_json(&app.router, "/check-expired-premiums").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Expired premium users updated");
    assert_eq!(json["modified"], 1);

    let reset = app.store.get_user(&weekly).await.unwrap().unwrap();
    assert!(!reset.premium);
    assert_eq!(reset.premium_plan, None);
    assert_eq!(reset.premium_start, None);
    assert_eq!(reset.premium_end, None);

    let still_monthly = app.store.get_user(&monthly).await.unwrap().unwrap();
    assert!(still_monthly.premium);
    assert_eq!(still_monthly.premium_plan, Some(PremiumPlan::Monthly));

    assert!(app.store.get_user(&lifetime).await.unwrap().unwrap().premium);
    assert!(app.store.get_user(&flag_only).await.unwrap().unwrap().premium);
    assert!(!app.store.get_user(&free).await.unwrap().unwrap().premium);

    // Running again finds nothing new.
    let (_, json) = get_json(&app.router, "/check-expired-premiums").await;
    assert_eq!(json["modified"], 0);
}

#[tokio::test]
async fn test_sweep_counts_end_equal_to_now_as_expired() {
    let app = create_test_app();
    let id = register(&app.router, "W", "1", "x").await;
    activate(&app.router, &id, "weekly").await;

    app.clock.advance(Duration::days(7));

    let (_, json) = get_json(&app.router, "/check-expired-premiums").await;
    assert_eq!(json["modified"], 1);
}

/// register → profile → lifetime activation → sweep leaves the user premium.
#[tokio::test]
async fn test_lifetime_scenario() {
    let app = create_test_app();

    let (status, json) = post_json(
        &app.router,
        "/register",
        json!({ "name": "A", "phone": "555", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = json["userId"].as_str().unwrap().to_string();

    let (status, json) = get_json(&app.router, &format!("/profile/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["age"], Value::Null);
    assert_eq!(json["user"]["premium"], false);

    let (status, json) = activate(&app.router, &id, "lifetime").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["premium"], true);
    assert_eq!(json["user"]["premiumEnd"], Value::Null);

    app.clock.advance(Duration::days(10_000));
    let (status, json) = get_json(&app.router, "/check-expired-premiums").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["modified"], 0);
}

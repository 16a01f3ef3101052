// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Search history endpoint tests: listing, rating, deletion, mechanic message.

use axum::http::StatusCode;
use codediy::db::DocumentStore;
use serde_json::{json, Value};

mod common;

async fn record_search(app: &axum::Router, token: &str, code: &str) -> Value {
    let response = common::send(
        app,
        "POST",
        "/api/search",
        token,
        Some(json!({
            "vehicle": { "year": "2001", "make": "Honda", "model": "Civic" },
            "code": code
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await
}

#[tokio::test]
async fn test_history_is_newest_first() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    let first = record_search(&app, &token, "P0300").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = record_search(&app, &token, "P0420").await;

    let response = common::send(&app, "GET", "/api/history", &token, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = common::body_json(response).await;
    assert_eq!(list[0]["id"], second["id"]);
    assert_eq!(list[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_rate_video() {
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    let entry = record_search(&app, &token, "P0300").await;
    let search_id = entry["id"].as_str().unwrap();

    let response = common::send(
        &app,
        "POST",
        &format!("/api/history/{}/videos/vid-b/rating", search_id),
        &token,
        Some(json!({ "isHelpful": true })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rated = common::body_json(response).await;
    assert_eq!(rated["id"], "vid-b");
    assert_eq!(rated["rated"], true);
    assert_eq!(rated["isHelpful"], true);

    // Only the one video changed
    let doc = store.get_user("uid-1").await.unwrap().unwrap();
    let results = &doc.search_history[0].results;
    assert!(results[1].rated);
    assert!(!results[0].rated && !results[2].rated);
}

#[tokio::test]
async fn test_rate_unknown_ids() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);
    let entry = record_search(&app, &token, "P0300").await;
    let search_id = entry["id"].as_str().unwrap();

    let response = common::send(
        &app,
        "POST",
        "/api/history/missing/videos/vid-a/rating",
        &token,
        Some(json!({ "isHelpful": false })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::body_json(response).await["error"], "search_not_found");

    let response = common::send(
        &app,
        "POST",
        &format!("/api/history/{}/videos/missing/rating", search_id),
        &token,
        Some(json!({ "isHelpful": false })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::body_json(response).await["error"], "video_not_found");
}

#[tokio::test]
async fn test_delete_and_clear_history() {
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    let first = record_search(&app, &token, "P0300").await;
    record_search(&app, &token, "P0171").await;

    let uri = format!("/api/history/{}", first["id"].as_str().unwrap());
    let response = common::send(&app, "DELETE", &uri, &token, None).await;
    assert_eq!(common::body_json(response).await, json!({ "deleted": true }));

    let response = common::send(&app, "GET", &uri, &token, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::send(&app, "DELETE", "/api/history", &token, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let doc = store.get_user("uid-1").await.unwrap().unwrap();
    assert!(doc.search_history.is_empty());
}

#[tokio::test]
async fn test_mechanic_message() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);
    let entry = record_search(&app, &token, "p0300").await;
    let search_id = entry["id"].as_str().unwrap();
    let uri = format!("/api/history/{}/mechanic-message", search_id);

    // No mechanic address yet
    let response = common::send(&app, "GET", &uri, &token, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    common::send(
        &app,
        "PUT",
        "/api/profile/mechanic-email",
        &token,
        Some(json!({ "mechanicEmail": "shop@example.com" })),
    )
    .await;
    common::send(
        &app,
        "POST",
        &format!("/api/history/{}/videos/vid-a/rating", search_id),
        &token,
        Some(json!({ "isHelpful": true })),
    )
    .await;

    let response = common::send(&app, "GET", &uri, &token, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let message = common::body_json(response).await;
    assert_eq!(message["to"], "shop@example.com");
    assert_eq!(
        message["subject"],
        "Help needed with 2001 Honda Civic - Code P0300"
    );
    assert!(message["body"]
        .as_str()
        .unwrap()
        .contains("watch?v=vid-a"));
    assert!(message["mailtoUrl"]
        .as_str()
        .unwrap()
        .starts_with("mailto:shop@example.com?subject="));
}

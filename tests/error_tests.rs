// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

use axum::http::StatusCode;
use axum::response::IntoResponse;
use codediy::error::AppError;

#[test]
fn test_is_not_found_matches() {
    assert!(AppError::VehicleNotFound("v1".to_string()).is_not_found());
    assert!(AppError::SearchNotFound("s1".to_string()).is_not_found());
    assert!(AppError::VideoNotFound("x1".to_string()).is_not_found());
}

#[test]
fn test_is_not_found_no_match() {
    assert!(!AppError::NotAuthenticated.is_not_found());
    assert!(!AppError::QuotaExceeded.is_not_found());
    assert!(!AppError::InvalidQuery("empty".to_string()).is_not_found());
    assert!(!AppError::StoreUnavailable("down".to_string()).is_not_found());
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::NotAuthenticated, StatusCode::UNAUTHORIZED),
        (
            AppError::StoreUnavailable("down".to_string()),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        (AppError::VehicleNotFound("v".to_string()), StatusCode::NOT_FOUND),
        (AppError::SearchNotFound("s".to_string()), StatusCode::NOT_FOUND),
        (AppError::VideoNotFound("x".to_string()), StatusCode::NOT_FOUND),
        (AppError::InvalidQuery("q".to_string()), StatusCode::BAD_REQUEST),
        (AppError::QuotaExceeded, StatusCode::TOO_MANY_REQUESTS),
        (AppError::UpstreamError("e".to_string()), StatusCode::BAD_GATEWAY),
        (AppError::BadRequest("b".to_string()), StatusCode::BAD_REQUEST),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}

#[tokio::test]
async fn test_not_found_body_names_the_id() {
    let response = AppError::SearchNotFound("s-42".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "search_not_found");
    assert_eq!(body["details"], "s-42");
}

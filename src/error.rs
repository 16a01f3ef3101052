// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Every kind is surfaced to the caller unchanged; nothing in the crate retries.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Document store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Search not found: {0}")]
    SearchNotFound(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    #[error("Video search quota exceeded")]
    QuotaExceeded,

    #[error("Video search service error: {0}")]
    UpstreamError(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for identity lookups that failed against a stale or deleted record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::VehicleNotFound(_) | AppError::SearchNotFound(_) | AppError::VideoNotFound(_)
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            tracing::debug!(error = %self, "Lookup by id found nothing");
        }

        let (status, error, details) = match &self {
            AppError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "not_authenticated", None),
            AppError::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "Document store error");
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", None)
            }
            AppError::VehicleNotFound(id) => {
                (StatusCode::NOT_FOUND, "vehicle_not_found", Some(id.clone()))
            }
            AppError::SearchNotFound(id) => {
                (StatusCode::NOT_FOUND, "search_not_found", Some(id.clone()))
            }
            AppError::VideoNotFound(id) => {
                (StatusCode::NOT_FOUND, "video_not_found", Some(id.clone()))
            }
            AppError::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_query", Some(msg.clone()))
            }
            AppError::QuotaExceeded => (StatusCode::TOO_MANY_REQUESTS, "quota_exceeded", None),
            AppError::UpstreamError(msg) => {
                tracing::warn!(error = %msg, "Video search upstream error");
                (StatusCode::BAD_GATEWAY, "upstream_error", None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type Result<T> = std::result::Result<T, AppError>;

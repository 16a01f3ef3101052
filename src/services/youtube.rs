// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! YouTube Data API client.
//!
//! Handles:
//! - Video search (`/search`, videos only, English relevance)
//! - Video details (`/videos`, snippet + statistics)
//! - Quota / rate limit detection, reported separately from other failures

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::services::video_index::{
    VideoDetails, VideoHit, VideoIndex, VideoSearchRequest,
};

/// Error reasons YouTube uses when a key has run out of quota.
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

/// YouTube Data API client.
#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client against the public API.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://www.googleapis.com/youtube/v3".to_string())
    }

    /// Create a client against a different endpoint (emulators, tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn check_api_key(&self) -> Result<()> {
        if is_valid_api_key(&self.api_key) {
            Ok(())
        } else {
            tracing::error!("YouTube API key is missing or malformed");
            Err(AppError::UpstreamError(
                "Invalid YouTube API key configuration".to_string(),
            ))
        }
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl VideoIndex for YouTubeClient {
    async fn search(&self, request: &VideoSearchRequest) -> Result<Vec<VideoHit>> {
        self.check_api_key()?;

        let query = request.query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        tracing::debug!(query, max_results = request.max_results, "YouTube search");

        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet".to_string()),
                    ("maxResults", request.max_results.to_string()),
                    ("q", query.to_string()),
                    ("type", request.result_type.to_string()),
                    ("relevanceLanguage", "en".to_string()),
                ],
            )
            .await?;

        let items = response.items.ok_or_else(|| {
            AppError::UpstreamError("Invalid response from YouTube API".to_string())
        })?;

        let hits: Vec<VideoHit> = items
            .into_iter()
            .filter_map(|item| {
                let Some(video_id) = item.id.video_id else {
                    tracing::debug!(kind = ?item.id.kind, "Skipping non-video search item");
                    return None;
                };
                Some(VideoHit {
                    video_id,
                    thumbnail_url: item.snippet.thumbnails.search_url(),
                    title: item.snippet.title,
                    description: item.snippet.description,
                    channel_title: item.snippet.channel_title,
                    published_at: item.snippet.published_at,
                })
            })
            .collect();

        tracing::info!(query, count = hits.len(), "YouTube search complete");
        Ok(hits)
    }

    async fn video_details(&self, video_id: &str) -> Result<VideoDetails> {
        self.check_api_key()?;

        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(AppError::InvalidQuery("Video ID cannot be empty".to_string()));
        }

        let response: VideoListResponse = self
            .get_json(
                "videos",
                &[
                    ("part", "snippet,statistics".to_string()),
                    ("id", video_id.to_string()),
                ],
            )
            .await?;

        let item = response
            .items
            .ok_or_else(|| {
                AppError::UpstreamError("Invalid response from YouTube API".to_string())
            })?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::VideoNotFound(video_id.to_string()))?;

        let statistics = item.statistics.unwrap_or_default();

        Ok(VideoDetails {
            thumbnail: item.snippet.thumbnails.details_url(),
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            channel_title: item.snippet.channel_title,
            published_at: item.snippet.published_at,
            view_count: statistics.view_count.and_then(|c| c.parse().ok()),
            like_count: statistics.like_count.and_then(|c| c.parse().ok()),
        })
    }
}

/// Keys shorter than this are certainly not real API keys.
pub fn is_valid_api_key(key: &str) -> bool {
    key.len() > 10
}

/// Map a non-success status to an error kind callers can tell apart.
///
/// 429 and quota-related 403s become `QuotaExceeded`; a 403 whose body names
/// some other reason is an `UpstreamError`. 400 is an `InvalidQuery`.
pub fn error_for_status(status: u16, body: &str) -> AppError {
    let reasons = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|r| {
            r.error
                .errors
                .into_iter()
                .filter_map(|e| e.reason)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    match status {
        429 => {
            tracing::warn!("YouTube rate limit hit (429)");
            AppError::QuotaExceeded
        }
        403 if reasons.is_empty() || reasons.iter().any(|r| QUOTA_REASONS.contains(&r.as_str())) => {
            tracing::warn!(?reasons, "YouTube quota exceeded (403)");
            AppError::QuotaExceeded
        }
        400 => AppError::InvalidQuery(format!("YouTube rejected the request: {}", body)),
        _ => AppError::UpstreamError(format!("HTTP {}: {}", status, body)),
    }
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    kind: Option<String>,
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    items: Option<Vec<VideoItem>>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Snippet,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Medium, falling back to default.
    fn search_url(self) -> Option<String> {
        self.medium.or(self.default).map(|t| t.url)
    }

    /// High, then medium, then default.
    fn details_url(self) -> Option<String> {
        self.high.or(self.medium).or(self.default).map(|t| t.url)
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Counts are sent as decimal strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! External video index abstraction.

use async_trait::async_trait;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::VideoResult;

/// Query sent to the video index.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSearchRequest {
    pub query: String,
    pub max_results: u32,
    /// Always `"video"`; channels and playlists are not wanted.
    pub result_type: &'static str,
}

impl VideoSearchRequest {
    pub fn videos(query: impl Into<String>, max_results: u32) -> Self {
        Self {
            query: query.into(),
            max_results,
            result_type: "video",
        }
    }
}

/// One ranked hit from the index, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoHit {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub channel_title: String,
    pub published_at: String,
}

impl From<VideoHit> for VideoResult {
    /// A fresh, unrated result.
    fn from(hit: VideoHit) -> Self {
        Self {
            id: hit.video_id,
            title: hit.title,
            description: hit.description,
            thumbnail: hit.thumbnail_url,
            channel_title: hit.channel_title,
            published_at: hit.published_at,
            rated: false,
            is_helpful: None,
        }
    }
}

/// Detailed metadata for a single video.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub channel_title: String,
    pub published_at: String,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
}

/// A searchable video index.
///
/// Implementations map rate limiting / quota exhaustion to
/// `AppError::QuotaExceeded` and other failures to `InvalidQuery` or
/// `UpstreamError`.
#[async_trait]
pub trait VideoIndex: Send + Sync {
    /// Ranked hits for a free-text query, at most `max_results` long.
    async fn search(&self, request: &VideoSearchRequest) -> Result<Vec<VideoHit>>;

    /// Metadata for one video.
    async fn video_details(&self, video_id: &str) -> Result<VideoDetails>;
}

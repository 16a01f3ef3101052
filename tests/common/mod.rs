// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

use async_trait::async_trait;
use codediy::config::Config;
use codediy::db::{FirestoreDb, MemoryStore};
use codediy::error::{AppError, Result};
use codediy::middleware::create_jwt;
use codediy::models::UserIdentity;
use codediy::routes::create_router;
use codediy::services::{VideoDetails, VideoHit, VideoIndex, VideoSearchRequest};
use codediy::AppState;
use std::sync::{Arc, Mutex};

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

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Video index double: replays fixed hits, or a fixed error.
#[allow(dead_code)]
pub struct FakeIndex {
    pub hits: Vec<VideoHit>,
    pub fail_with: Option<fn() -> AppError>,
    pub queries: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeIndex {
    pub fn with_hits(ids: &[&str]) -> Self {
        Self {
            hits: ids.iter().map(|id| hit(id)).collect(),
            fail_with: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: fn() -> AppError) -> Self {
        Self {
            hits: Vec::new(),
            fail_with: Some(err),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VideoIndex for FakeIndex {
    async fn search(&self, request: &VideoSearchRequest) -> Result<Vec<VideoHit>> {
        self.queries.lock().unwrap().push(request.query.clone());
        if let Some(err) = self.fail_with {
            return Err(err());
        }
        Ok(self
            .hits
            .iter()
            .take(request.max_results as usize)
            .cloned()
            .collect())
    }

    async fn video_details(&self, video_id: &str) -> Result<VideoDetails> {
        let hit = self
            .hits
            .iter()
            .find(|h| h.video_id == video_id)
            .ok_or_else(|| AppError::VideoNotFound(video_id.to_string()))?;
        Ok(VideoDetails {
            id: hit.video_id.clone(),
            title: hit.title.clone(),
            description: hit.description.clone(),
            thumbnail: hit.thumbnail_url.clone(),
            channel_title: hit.channel_title.clone(),
            published_at: hit.published_at.clone(),
            view_count: Some(1000),
            like_count: Some(10),
        })
    }
}

#[allow(dead_code)]
pub fn hit(id: &str) -> VideoHit {
    VideoHit {
        video_id: id.to_string(),
        title: format!("Fix it: {}", id),
        description: "How to diagnose and repair".to_string(),
        thumbnail_url: Some(format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", id)),
        channel_title: "Garage Channel".to_string(),
        published_at: "2023-05-01T12:00:00Z".to_string(),
    }
}

/// Test app backed by an in-memory store and the given index.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app_with(index: FakeIndex) -> (axum::Router, Arc<AppState>, MemoryStore) {
    let store = MemoryStore::new();
    let state = Arc::new(AppState::new(
        Config::default(),
        Arc::new(store.clone()),
        Arc::new(index),
    ));
    (create_router(state.clone()), state, store)
}

/// Test app with three canned videos.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    create_test_app_with(FakeIndex::with_hits(&["vid-a", "vid-b", "vid-c"]))
}

/// Session token for `user_id`, signed with `signing_key`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(&UserIdentity::new(user_id), signing_key).expect("Failed to create JWT")
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Send one authenticated request with an optional JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

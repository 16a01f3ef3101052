// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Search history manager: CRUD over the `searchHistory` array, including
//! per-video ratings nested inside each entry.
//!
//! Deletes and ratings rewrite the whole array from the snapshot they read.
//! An entry appended by another session between that read and the write is
//! lost (last writer wins on the field). Plain adds use set-union appends
//! and do not have this problem.

use crate::db::{ArrayElement, FieldUpdate};
use crate::error::{AppError, Result};
use crate::models::{HistoryIndex, NewSearchEntry, SearchEntry, UserIdentity, VideoResult};
use crate::services::ProfileStore;

#[derive(Clone)]
pub struct SearchHistoryManager {
    profiles: ProfileStore,
}

impl SearchHistoryManager {
    pub fn new(profiles: ProfileStore) -> Self {
        Self { profiles }
    }

    /// Record a completed search with a fresh id and timestamp.
    pub async fn add(&self, identity: &UserIdentity, entry: NewSearchEntry) -> Result<SearchEntry> {
        let doc = self.profiles.ensure_document(identity).await?;
        let entry = SearchEntry::new(entry);

        self.profiles
            .db()
            .append_unique(&doc.user_id, ArrayElement::SearchEntry(entry.clone()))
            .await?;

        tracing::info!(
            user_id = %doc.user_id,
            search_id = %entry.id,
            code = %entry.code,
            results = entry.results.len(),
            "Search added to history"
        );
        Ok(entry)
    }

    /// History ordered newest first.
    pub async fn list(&self, identity: &UserIdentity) -> Result<Vec<SearchEntry>> {
        Ok(self.load(identity).await?.1.newest_first())
    }

    /// A single entry by id.
    pub async fn get(&self, identity: &UserIdentity, search_id: &str) -> Result<SearchEntry> {
        let (_, index) = self.load(identity).await?;
        index
            .get(search_id)
            .cloned()
            .ok_or_else(|| AppError::SearchNotFound(search_id.to_string()))
    }

    /// Remove the entry with this id.
    ///
    /// Returns `false` without writing if no such entry exists.
    pub async fn delete(&self, identity: &UserIdentity, search_id: &str) -> Result<bool> {
        let (user_id, index) = self.load(identity).await?;
        if !index.contains(search_id) {
            tracing::warn!(user_id = %user_id, search_id, "Search not found for delete");
            return Ok(false);
        }

        let remaining: Vec<SearchEntry> = index
            .into_entries()
            .into_iter()
            .filter(|e| e.id != search_id)
            .collect();

        self.profiles
            .db()
            .update_field(&user_id, FieldUpdate::SearchHistory(remaining))
            .await?;

        tracing::info!(user_id = %user_id, search_id, "Search deleted from history");
        Ok(true)
    }

    /// Empty the history. Vehicles and profile fields are left untouched.
    pub async fn clear(&self, identity: &UserIdentity) -> Result<()> {
        let doc = self.profiles.ensure_document(identity).await?;
        self.profiles
            .db()
            .update_field(&doc.user_id, FieldUpdate::SearchHistory(Vec::new()))
            .await?;
        tracing::info!(user_id = %doc.user_id, "Search history cleared");
        Ok(())
    }

    /// Mark one video in one history entry as helpful or not.
    ///
    /// Fails with `SearchNotFound` / `VideoNotFound` if either id is absent
    /// from the snapshot read just before the write.
    pub async fn rate_video(
        &self,
        identity: &UserIdentity,
        search_id: &str,
        video_id: &str,
        is_helpful: bool,
    ) -> Result<VideoResult> {
        let (user_id, mut index) = self.load(identity).await?;

        let rated = index.rate(search_id, video_id, is_helpful)?.clone();

        self.profiles
            .db()
            .update_field(&user_id, FieldUpdate::SearchHistory(index.into_entries()))
            .await?;

        tracing::info!(
            user_id = %user_id,
            search_id,
            video_id,
            is_helpful,
            "Video rated"
        );
        Ok(rated)
    }

    async fn load(&self, identity: &UserIdentity) -> Result<(String, HistoryIndex)> {
        let (user_id, doc) = self.profiles.load_or_create(identity).await?;
        Ok((user_id, HistoryIndex::new(doc.search_history)))
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Keyed view over a search history snapshot.
//!
//! The store keeps `searchHistory` as a plain array, so every nested edit has
//! to write the whole array back. `HistoryIndex` resolves
//! `search_id -> entry` and `video_id -> result` through hash maps built once
//! per snapshot, so a rating touches only the addressed leaf in memory while
//! stored order is left exactly as it was read.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{SearchEntry, VideoResult};

struct EntrySlot {
    position: usize,
    videos: HashMap<String, usize>,
}

/// Search history with identity lookups on both levels.
pub struct HistoryIndex {
    entries: Vec<SearchEntry>,
    slots: HashMap<String, EntrySlot>,
}

impl HistoryIndex {
    /// Index a snapshot. If an id appears more than once, the first
    /// occurrence is the one addressed.
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        let mut slots = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            slots.entry(entry.id.clone()).or_insert_with(|| {
                let mut videos = HashMap::with_capacity(entry.results.len());
                for (i, video) in entry.results.iter().enumerate() {
                    videos.entry(video.id.clone()).or_insert(i);
                }
                EntrySlot { position, videos }
            });
        }

        Self { entries, slots }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, search_id: &str) -> bool {
        self.slots.contains_key(search_id)
    }

    /// Look up an entry by id.
    pub fn get(&self, search_id: &str) -> Option<&SearchEntry> {
        self.slots
            .get(search_id)
            .map(|slot| &self.entries[slot.position])
    }

    /// Look up a single video inside an entry.
    pub fn video(&self, search_id: &str, video_id: &str) -> Result<&VideoResult> {
        let slot = self
            .slots
            .get(search_id)
            .ok_or_else(|| AppError::SearchNotFound(search_id.to_string()))?;
        let index = slot
            .videos
            .get(video_id)
            .ok_or_else(|| AppError::VideoNotFound(video_id.to_string()))?;
        Ok(&self.entries[slot.position].results[*index])
    }

    /// Mark one video as rated. Nothing else in the snapshot changes.
    pub fn rate(&mut self, search_id: &str, video_id: &str, is_helpful: bool) -> Result<&VideoResult> {
        let slot = self
            .slots
            .get(search_id)
            .ok_or_else(|| AppError::SearchNotFound(search_id.to_string()))?;
        let index = *slot
            .videos
            .get(video_id)
            .ok_or_else(|| AppError::VideoNotFound(video_id.to_string()))?;

        let video = &mut self.entries[slot.position].results[index];
        video.rate(is_helpful);
        Ok(video)
    }

    /// Entries ordered newest first by timestamp.
    pub fn newest_first(&self) -> Vec<SearchEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }

    /// Give back the entries in stored order, for writing to the store.
    pub fn into_entries(self) -> Vec<SearchEntry> {
        self.entries
    }
}

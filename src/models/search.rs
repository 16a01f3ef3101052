// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Search history entries and the video results recorded with them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::VehicleSnapshot;

/// One completed search, stored in the `searchHistory` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SearchEntry {
    pub id: String,
    /// Vehicle as it was when the search ran
    pub vehicle: VehicleSnapshot,
    /// Diagnostic trouble code, uppercased
    pub code: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub results: Vec<VideoResult>,
}

impl SearchEntry {
    /// Stamp a new entry with an identifier and the current time.
    pub fn new(entry: NewSearchEntry) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vehicle: entry.vehicle,
            code: entry.code.trim().to_uppercase(),
            timestamp: Utc::now(),
            results: entry.results,
        }
    }
}

/// Fields supplied by the caller when recording a search.
#[derive(Debug, Clone)]
pub struct NewSearchEntry {
    pub vehicle: VehicleSnapshot,
    pub code: String,
    pub results: Vec<VideoResult>,
}

/// A video shown for a search, with the user's helpfulness rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VideoResult {
    /// External video identifier
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub published_at: String,
    /// Set once the user rates the video; never reset
    #[serde(default)]
    pub rated: bool,
    #[serde(default)]
    pub is_helpful: Option<bool>,
}

impl VideoResult {
    /// Record a rating. Ratings are one-way: `rated` stays true afterwards.
    pub fn rate(&mut self, is_helpful: bool) {
        self.rated = true;
        self.is_helpful = Some(is_helpful);
    }

    /// Public watch URL for the video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

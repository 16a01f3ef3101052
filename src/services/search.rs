// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Search orchestration: vehicle + trouble code -> video results -> history.
//!
//! Search and save are sequential and not transactional. If saving fails
//! after the index answered, no history entry exists and the caller has to
//! run the whole search again.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{NewSearchEntry, SearchEntry, UserIdentity, VehicleSnapshot, VideoResult};
use crate::services::video_index::{VideoIndex, VideoSearchRequest};
use crate::services::SearchHistoryManager;

/// Normalized search inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairQuery {
    pub code: String,
    pub year: String,
    pub make: String,
    pub model: String,
}

impl RepairQuery {
    /// Trim every field and uppercase the code.
    ///
    /// Fails with `InvalidQuery` if code, make or model ends up empty.
    pub fn normalize(make: &str, model: &str, year: &str, code: &str) -> Result<Self> {
        let query = Self {
            code: code.trim().to_uppercase(),
            year: year.trim().to_string(),
            make: make.trim().to_string(),
            model: model.trim().to_string(),
        };

        if query.code.is_empty() {
            return Err(AppError::InvalidQuery(
                "Trouble code is required".to_string(),
            ));
        }
        if query.make.is_empty() || query.model.is_empty() {
            return Err(AppError::InvalidQuery(
                "Vehicle make and model are required".to_string(),
            ));
        }

        Ok(query)
    }

    /// Free-text query: `CODE YEAR MAKE MODEL repair`.
    ///
    /// An empty year is skipped rather than leaving a double space.
    pub fn to_query_string(&self) -> String {
        [
            self.code.as_str(),
            self.year.as_str(),
            self.make.as_str(),
            self.model.as_str(),
            "repair",
        ]
        .iter()
        .filter(|token| !token.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Build the index query for a vehicle and trouble code.
pub fn build_query(make: &str, model: &str, year: &str, code: &str) -> Result<String> {
    Ok(RepairQuery::normalize(make, model, year, code)?.to_query_string())
}

/// Runs repair-video searches and records them in history.
#[derive(Clone)]
pub struct SearchOrchestrator {
    index: Arc<dyn VideoIndex>,
    history: SearchHistoryManager,
    max_results: u32,
}

impl SearchOrchestrator {
    pub fn new(index: Arc<dyn VideoIndex>, history: SearchHistoryManager, max_results: u32) -> Self {
        Self {
            index,
            history,
            max_results,
        }
    }

    pub fn index(&self) -> &dyn VideoIndex {
        self.index.as_ref()
    }

    /// Search the index for repair videos. Results come back unrated.
    pub async fn search_repair_videos(
        &self,
        make: &str,
        model: &str,
        year: &str,
        code: &str,
    ) -> Result<Vec<VideoResult>> {
        let query = build_query(make, model, year, code)?;
        tracing::info!(query = %query, "Searching for repair videos");

        let hits = self
            .index
            .search(&VideoSearchRequest::videos(query, self.max_results))
            .await?;

        Ok(hits.into_iter().map(VideoResult::from).collect())
    }

    /// Search, then append the results to the user's history.
    pub async fn search_and_save(
        &self,
        identity: &UserIdentity,
        vehicle: VehicleSnapshot,
        code: &str,
    ) -> Result<SearchEntry> {
        let results = self
            .search_repair_videos(&vehicle.make, &vehicle.model, &vehicle.year, code)
            .await?;

        self.history
            .add(
                identity,
                NewSearchEntry {
                    vehicle,
                    code: code.to_string(),
                    results,
                },
            )
            .await
    }
}

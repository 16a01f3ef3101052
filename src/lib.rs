// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! CodeDIY: find repair videos for a vehicle and a diagnostic trouble code
//!
//! This crate provides the backend API: a per-user document holding the
//! user's vehicles and search history, and a search orchestrator that queries
//! an external video index and records every search.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::Config;
use db::DocumentStore;
use services::{
    ProfileStore, SearchHistoryManager, SearchOrchestrator, VehicleManager, VideoIndex,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub profiles: ProfileStore,
    pub vehicles: VehicleManager,
    pub history: SearchHistoryManager,
    pub search: SearchOrchestrator,
}

impl AppState {
    /// Wire the managers over one document store and one video index.
    pub fn new(config: Config, db: Arc<dyn DocumentStore>, index: Arc<dyn VideoIndex>) -> Self {
        let profiles = ProfileStore::new(db);
        let vehicles = VehicleManager::new(profiles.clone());
        let history = SearchHistoryManager::new(profiles.clone());
        let search = SearchOrchestrator::new(index, history.clone(), config.search_max_results);

        Self {
            config,
            profiles,
            vehicles,
            history,
            search,
        }
    }
}

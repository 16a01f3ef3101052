// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Services module - business logic layer.

pub mod history;
pub mod mechanic;
pub mod profile;
pub mod search;
pub mod vehicles;
pub mod video_index;
pub mod youtube;

pub use history::SearchHistoryManager;
pub use mechanic::MechanicMessage;
pub use profile::{DocumentRef, ProfileStore};
pub use search::{build_query, SearchOrchestrator};
pub use vehicles::VehicleManager;
pub use video_index::{VideoDetails, VideoHit, VideoIndex, VideoSearchRequest};
pub use youtube::YouTubeClient;

// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Data models for the application.

pub mod history_index;
pub mod search;
pub mod user;
pub mod vehicle;

pub use history_index::HistoryIndex;
pub use search::{NewSearchEntry, SearchEntry, VideoResult};
pub use user::{UserDocument, UserIdentity};
pub use vehicle::{Vehicle, VehicleInput, VehicleSnapshot};

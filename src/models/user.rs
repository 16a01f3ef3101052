// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Per-user document holding profile fields and embedded collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{SearchEntry, Vehicle};

/// User document stored in Firestore (document ID is the user ID).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserDocument {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    /// Contact address for the user's mechanic
    #[serde(default)]
    pub mechanic_email: String,
    /// Set when the document is first created, never updated
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub search_history: Vec<SearchEntry>,
}

impl UserDocument {
    /// Empty document for a user seen for the first time.
    pub fn new_for(identity: &UserIdentity) -> Self {
        Self {
            display_name: identity.display_name.clone().unwrap_or_default(),
            email: identity.email.clone().unwrap_or_default(),
            mechanic_email: String::new(),
            created_at: Utc::now(),
            vehicles: Vec::new(),
            search_history: Vec::new(),
        }
    }
}

/// Identity of an authenticated caller.
///
/// Optional profile hints come from the session token and only seed a newly
/// created document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserIdentity {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Document store layer.
//!
//! [`DocumentStore`] is the seam between the sync core and the backing
//! service. [`FirestoreDb`] talks to Firestore; [`MemoryStore`] keeps
//! documents in process for tests and local runs.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{SearchEntry, UserDocument, Vehicle};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// Field names inside a user document, as stored.
pub mod fields {
    pub const DISPLAY_NAME: &str = "displayName";
    pub const MECHANIC_EMAIL: &str = "mechanicEmail";
    pub const VEHICLES: &str = "vehicles";
    pub const SEARCH_HISTORY: &str = "searchHistory";
}

/// Partial update of a single top-level field.
///
/// Other fields of the document are left untouched.
#[derive(Debug, Clone)]
pub enum FieldUpdate {
    DisplayName(String),
    MechanicEmail(String),
    Vehicles(Vec<Vehicle>),
    SearchHistory(Vec<SearchEntry>),
}

impl FieldUpdate {
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldUpdate::DisplayName(_) => fields::DISPLAY_NAME,
            FieldUpdate::MechanicEmail(_) => fields::MECHANIC_EMAIL,
            FieldUpdate::Vehicles(_) => fields::VEHICLES,
            FieldUpdate::SearchHistory(_) => fields::SEARCH_HISTORY,
        }
    }

    /// Write this field onto an in-memory document.
    pub fn apply_to(self, doc: &mut UserDocument) {
        match self {
            FieldUpdate::DisplayName(v) => doc.display_name = v,
            FieldUpdate::MechanicEmail(v) => doc.mechanic_email = v,
            FieldUpdate::Vehicles(v) => doc.vehicles = v,
            FieldUpdate::SearchHistory(v) => doc.search_history = v,
        }
    }
}

/// Element appended to one of the document's array fields.
#[derive(Debug, Clone)]
pub enum ArrayElement {
    Vehicle(Vehicle),
    SearchEntry(SearchEntry),
}

impl ArrayElement {
    pub fn field_name(&self) -> &'static str {
        match self {
            ArrayElement::Vehicle(_) => fields::VEHICLES,
            ArrayElement::SearchEntry(_) => fields::SEARCH_HISTORY,
        }
    }

    /// Set-union append: push unless an equal element is already present.
    ///
    /// Returns `true` if the array changed.
    pub fn union_into(self, doc: &mut UserDocument) -> bool {
        match self {
            ArrayElement::Vehicle(v) => push_missing(&mut doc.vehicles, v),
            ArrayElement::SearchEntry(e) => push_missing(&mut doc.search_history, e),
        }
    }
}

fn push_missing<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}

/// Storage backend for per-user documents.
///
/// Every method maps transport failures to `AppError::StoreUnavailable`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the full document, or `None` if it does not exist.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserDocument>>;

    /// Create the document unless one already exists.
    ///
    /// Returns `true` if this call created it.
    async fn create_user_if_absent(&self, user_id: &str, doc: &UserDocument) -> Result<bool>;

    /// Overwrite one top-level field.
    async fn update_field(&self, user_id: &str, update: FieldUpdate) -> Result<()>;

    /// Append to an array field with set-union semantics.
    async fn append_unique(&self, user_id: &str, element: ArrayElement) -> Result<()>;

    /// Replace the vehicle with the same `id` in a single write.
    ///
    /// Returns the stored record, or `None` if no vehicle has that id.
    async fn replace_vehicle(&self, user_id: &str, vehicle: &Vehicle) -> Result<Option<Vehicle>>;
}

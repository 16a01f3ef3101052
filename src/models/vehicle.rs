// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Vehicle records embedded in the user document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// A saved vehicle, stored in the `vehicles` array of the user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Vehicle {
    /// Client-generated identifier (UUID v4), immutable
    pub id: String,
    pub year: String,
    pub make: String,
    pub model: String,
    /// When the vehicle was first saved
    pub added_at: DateTime<Utc>,
}

impl Vehicle {
    /// Create a new record with a fresh identifier.
    pub fn new(input: VehicleInput) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            year: input.year.trim().to_string(),
            make: input.make.trim().to_string(),
            model: input.model.trim().to_string(),
            added_at: Utc::now(),
        }
    }

    /// Copy the mutable fields of `update` onto this record.
    ///
    /// `id` and `added_at` are never overwritten.
    pub fn apply_update(&mut self, update: &Vehicle) {
        self.year = update.year.trim().to_string();
        self.make = update.make.trim().to_string();
        self.model = update.model.trim().to_string();
    }
}

/// User-supplied fields for a new or edited vehicle.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleInput {
    #[validate(custom(function = "not_blank"), length(max = 10))]
    pub year: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub make: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub model: String,
}

/// Fields are stored trimmed, so whitespace alone counts as empty.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Value copy of a vehicle taken when a search is recorded.
///
/// Later edits to the originating [`Vehicle`] do not change history entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VehicleSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub year: String,
    pub make: String,
    pub model: String,
}

impl From<&Vehicle> for VehicleSnapshot {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: Some(vehicle.id.clone()),
            year: vehicle.year.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
        }
    }
}

impl From<VehicleInput> for VehicleSnapshot {
    fn from(input: VehicleInput) -> Self {
        Self {
            id: None,
            year: input.year.trim().to_string(),
            make: input.make.trim().to_string(),
            model: input.model.trim().to_string(),
        }
    }
}

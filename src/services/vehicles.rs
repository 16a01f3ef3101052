// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Vehicle collection manager: CRUD over the `vehicles` array.

use crate::db::{ArrayElement, FieldUpdate};
use crate::error::{AppError, Result};
use crate::models::{UserIdentity, Vehicle, VehicleInput};
use crate::services::ProfileStore;

/// Add, list, update and delete saved vehicles.
#[derive(Clone)]
pub struct VehicleManager {
    profiles: ProfileStore,
}

impl VehicleManager {
    pub fn new(profiles: ProfileStore) -> Self {
        Self { profiles }
    }

    /// Save a new vehicle with a fresh id and `added_at`.
    ///
    /// Uses a set-union append, so concurrent unrelated appends are kept.
    pub async fn add(&self, identity: &UserIdentity, input: VehicleInput) -> Result<Vehicle> {
        let doc = self.profiles.ensure_document(identity).await?;
        let vehicle = Vehicle::new(input);

        self.profiles
            .db()
            .append_unique(&doc.user_id, ArrayElement::Vehicle(vehicle.clone()))
            .await?;

        tracing::info!(user_id = %doc.user_id, vehicle_id = %vehicle.id, "Vehicle added");
        Ok(vehicle)
    }

    /// All saved vehicles in insertion order.
    pub async fn list(&self, identity: &UserIdentity) -> Result<Vec<Vehicle>> {
        let (_, doc) = self.profiles.load_or_create(identity).await?;
        Ok(doc.vehicles)
    }

    /// A single vehicle by id.
    pub async fn get(&self, identity: &UserIdentity, vehicle_id: &str) -> Result<Vehicle> {
        self.list(identity)
            .await?
            .into_iter()
            .find(|v| v.id == vehicle_id)
            .ok_or_else(|| AppError::VehicleNotFound(vehicle_id.to_string()))
    }

    /// Replace year/make/model of the vehicle with the same id.
    ///
    /// The replacement is one write keyed on the id; a vehicle that is not in
    /// the collection is never inserted.
    pub async fn update(&self, identity: &UserIdentity, vehicle: &Vehicle) -> Result<Vehicle> {
        let doc = self.profiles.ensure_document(identity).await?;

        let updated = self
            .profiles
            .db()
            .replace_vehicle(&doc.user_id, vehicle)
            .await?
            .ok_or_else(|| AppError::VehicleNotFound(vehicle.id.clone()))?;

        tracing::info!(user_id = %doc.user_id, vehicle_id = %updated.id, "Vehicle updated");
        Ok(updated)
    }

    /// Remove the vehicle with this id.
    ///
    /// Returns `false` without writing if no such vehicle exists.
    pub async fn delete(&self, identity: &UserIdentity, vehicle_id: &str) -> Result<bool> {
        let (user_id, doc) = self.profiles.load_or_create(identity).await?;

        let before = doc.vehicles.len();
        let remaining: Vec<Vehicle> = doc
            .vehicles
            .into_iter()
            .filter(|v| v.id != vehicle_id)
            .collect();

        if remaining.len() == before {
            tracing::warn!(user_id = %user_id, vehicle_id, "Vehicle not found for delete");
            return Ok(false);
        }

        self.profiles
            .db()
            .update_field(&user_id, FieldUpdate::Vehicles(remaining))
            .await?;

        tracing::info!(user_id = %user_id, vehicle_id, "Vehicle deleted");
        Ok(true)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! In-memory [`DocumentStore`] for tests and local development.
//!
//! Documents live in a `DashMap` keyed by user ID. Each operation holds the
//! shard lock for its document, so appends and vehicle replacement are
//! atomic here even though read-modify-write sequences built on top of
//! `get_user` + `update_field` are not.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::db::{ArrayElement, DocumentStore, FieldUpdate};
use crate::error::{AppError, Result};
use crate::models::{UserDocument, UserIdentity, Vehicle};

/// In-memory document store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    docs: Arc<DashMap<String, UserDocument>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a transport outage: every call fails with `StoreUnavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable(
                "In-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserDocument>> {
        self.check_online()?;
        Ok(self.docs.get(user_id).map(|doc| doc.clone()))
    }

    async fn create_user_if_absent(&self, user_id: &str, doc: &UserDocument) -> Result<bool> {
        self.check_online()?;
        let mut created = false;
        self.docs.entry(user_id.to_string()).or_insert_with(|| {
            created = true;
            doc.clone()
        });
        Ok(created)
    }

    async fn update_field(&self, user_id: &str, update: FieldUpdate) -> Result<()> {
        self.check_online()?;
        // A partial update against a missing document creates it, as Firestore's
        // masked update does.
        let mut doc = self
            .docs
            .entry(user_id.to_string())
            .or_insert_with(|| UserDocument::new_for(&UserIdentity::new(user_id)));
        update.apply_to(&mut doc);
        Ok(())
    }

    async fn append_unique(&self, user_id: &str, element: ArrayElement) -> Result<()> {
        self.check_online()?;
        let mut doc = self
            .docs
            .entry(user_id.to_string())
            .or_insert_with(|| UserDocument::new_for(&UserIdentity::new(user_id)));
        element.union_into(&mut doc);
        Ok(())
    }

    async fn replace_vehicle(&self, user_id: &str, vehicle: &Vehicle) -> Result<Option<Vehicle>> {
        self.check_online()?;
        let Some(mut doc) = self.docs.get_mut(user_id) else {
            return Ok(None);
        };
        Ok(doc
            .vehicles
            .iter_mut()
            .find(|v| v.id == vehicle.id)
            .map(|stored| {
                stored.apply_update(vehicle);
                stored.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleInput;

    fn vehicle(model: &str) -> Vehicle {
        Vehicle::new(VehicleInput {
            year: "2001".to_string(),
            make: "Honda".to_string(),
            model: model.to_string(),
        })
    }

    #[tokio::test]
    async fn test_create_if_absent_is_idempotent() {
        let store = MemoryStore::new();
        let mut doc = UserDocument::new_for(&UserIdentity::new("u1"));
        assert!(store.create_user_if_absent("u1", &doc).await.unwrap());

        doc.mechanic_email = "changed@example.com".to_string();
        assert!(!store.create_user_if_absent("u1", &doc).await.unwrap());

        let stored = store.get_user("u1").await.unwrap().unwrap();
        assert_eq!(stored.mechanic_email, "");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append_unique("u1", ArrayElement::Vehicle(vehicle(&format!("M{}", i))))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let doc = store.get_user("u1").await.unwrap().unwrap();
        assert_eq!(doc.vehicles.len(), 20);
    }

    #[tokio::test]
    async fn test_replace_vehicle_missing_id() {
        let store = MemoryStore::new();
        store
            .append_unique("u1", ArrayElement::Vehicle(vehicle("Civic")))
            .await
            .unwrap();
        assert!(store
            .replace_vehicle("u1", &vehicle("Accord"))
            .await
            .unwrap()
            .is_none());
        assert!(store
            .replace_vehicle("nobody", &vehicle("Accord"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(
            store.get_user("u1").await,
            Err(AppError::StoreUnavailable(_))
        ));
        assert!(matches!(
            store
                .append_unique("u1", ArrayElement::Vehicle(vehicle("Civic")))
                .await,
            Err(AppError::StoreUnavailable(_))
        ));
        store.set_offline(false);
        assert!(store.get_user("u1").await.unwrap().is_none());
    }
}

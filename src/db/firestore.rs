// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Firestore client wrapper with typed operations.
//!
//! All user state lives in one document per user in the `users` collection.
//! Partial writes use field masks so that an update to one field never
//! clobbers the others. Array appends are server-side
//! `appendMissingElements` transforms, so concurrent appends from other
//! sessions are never lost. Vehicle replacement commits a single masked
//! write through a transaction.

use async_trait::async_trait;

use crate::db::{collections, ArrayElement, DocumentStore, FieldUpdate};
use crate::error::{AppError, Result};
use crate::models::{UserDocument, UserIdentity, Vehicle};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id).await.map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to connect to Firestore: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return `StoreUnavailable` if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb> {
        self.client.as_ref().ok_or_else(|| {
            AppError::StoreUnavailable("Database not connected (offline mode)".to_string())
        })
    }

    /// Commit `doc` in one transaction, writing only `field` when the
    /// document already existed and the whole document otherwise.
    async fn commit_document(
        &self,
        user_id: &str,
        doc: &UserDocument,
        field: Option<&'static str>,
    ) -> Result<()> {
        let client = self.get_client()?;

        let mut transaction = client.begin_transaction().await.map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to begin transaction: {}", e))
        })?;

        match field {
            Some(field) => client
                .fluent()
                .update()
                .fields([field])
                .in_col(collections::USERS)
                .document_id(user_id)
                .object(doc)
                .add_to_transaction(&mut transaction),
            None => client
                .fluent()
                .update()
                .in_col(collections::USERS)
                .document_id(user_id)
                .object(doc)
                .add_to_transaction(&mut transaction),
        }
        .map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to add write to transaction: {}", e))
        })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Transaction commit failed: {}", e)))?;

        Ok(())
    }

    /// Server-side set-union append of `value` to the array `field`.
    ///
    /// Fails if the document does not exist.
    async fn append_transform(
        &self,
        user_id: &str,
        field: &'static str,
        value: &firestore::FirestoreValue,
    ) -> Result<()> {
        let client = self.get_client()?;

        let mut transaction = client.begin_transaction().await.map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to begin transaction: {}", e))
        })?;

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .precondition(firestore::FirestoreWritePrecondition::Exists(true))
            .document_id(user_id)
            .transforms(|t| t.fields([t.field(field).append_missing_elements([value.clone()])]))
            .only_transform()
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::StoreUnavailable(format!("Failed to add transform to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Transaction commit failed: {}", e)))?;

        Ok(())
    }
}

/// Encode an array element the same way `object()` encodes the document.
fn array_value(element: &ArrayElement) -> firestore::FirestoreValue {
    match element {
        ArrayElement::Vehicle(vehicle) => vehicle.into(),
        ArrayElement::SearchEntry(entry) => entry.into(),
    }
}

#[async_trait]
impl DocumentStore for FirestoreDb {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserDocument>> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }

    async fn create_user_if_absent(&self, user_id: &str, doc: &UserDocument) -> Result<bool> {
        let inserted: std::result::Result<(), _> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(user_id)
            .object(doc)
            .execute()
            .await;

        match inserted {
            Ok(()) => Ok(true),
            Err(e) => {
                // Insert fails if another session created the document first.
                if self.get_user(user_id).await?.is_some() {
                    tracing::debug!(user_id, "User document already exists");
                    Ok(false)
                } else {
                    Err(AppError::StoreUnavailable(e.to_string()))
                }
            }
        }
    }

    async fn update_field(&self, user_id: &str, update: FieldUpdate) -> Result<()> {
        let field = update.field_name();

        // Only `field` is written; the rest of this placeholder is masked out.
        let mut doc = UserDocument::new_for(&UserIdentity::new(user_id));
        update.apply_to(&mut doc);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields([field])
            .in_col(collections::USERS)
            .document_id(user_id)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        tracing::debug!(user_id, field, "Updated user field");
        Ok(())
    }

    async fn append_unique(&self, user_id: &str, element: ArrayElement) -> Result<()> {
        let field = element.field_name();
        let value = array_value(&element);

        if self.append_transform(user_id, field, &value).await.is_ok() {
            tracing::debug!(user_id, field, "Appended array element");
            return Ok(());
        }

        // The transform requires an existing document. Create it with the
        // element already in place.
        let mut doc = UserDocument::new_for(&UserIdentity::new(user_id));
        element.union_into(&mut doc);
        if self.create_user_if_absent(user_id, &doc).await? {
            tracing::debug!(user_id, field, "Created user document with array element");
            return Ok(());
        }

        // Another session created the document first.
        self.append_transform(user_id, field, &value).await?;
        tracing::debug!(user_id, field, "Appended array element");
        Ok(())
    }

    async fn replace_vehicle(&self, user_id: &str, vehicle: &Vehicle) -> Result<Option<Vehicle>> {
        let Some(mut doc) = self.get_user(user_id).await? else {
            return Ok(None);
        };

        let Some(stored) = doc.vehicles.iter_mut().find(|v| v.id == vehicle.id) else {
            return Ok(None);
        };
        stored.apply_update(vehicle);
        let replaced = stored.clone();

        self.commit_document(user_id, &doc, Some(crate::db::fields::VEHICLES))
            .await?;

        Ok(Some(replaced))
    }
}

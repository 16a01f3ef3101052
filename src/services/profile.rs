// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! User profile store: owns the per-user document.
//!
//! Every other manager calls [`ProfileStore::ensure_document`] before
//! touching the document, so no caller ever sees a missing-document error.

use std::sync::Arc;

use crate::db::{DocumentStore, FieldUpdate};
use crate::error::{AppError, Result};
use crate::models::{UserDocument, UserIdentity};

/// Reference to a user document known to exist.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRef {
    pub user_id: String,
}

/// Reject calls made without an authenticated user.
pub(crate) fn require_user(user_id: &str) -> Result<&str> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::NotAuthenticated);
    }
    Ok(user_id)
}

/// Profile access and document bootstrap.
#[derive(Clone)]
pub struct ProfileStore {
    db: Arc<dyn DocumentStore>,
}

impl ProfileStore {
    pub fn new(db: Arc<dyn DocumentStore>) -> Self {
        Self { db }
    }

    pub(crate) fn db(&self) -> &dyn DocumentStore {
        self.db.as_ref()
    }

    /// Make sure the user's document exists, creating an empty one if not.
    ///
    /// Idempotent; safe to call before every mutation.
    pub async fn ensure_document(&self, identity: &UserIdentity) -> Result<DocumentRef> {
        Ok(DocumentRef {
            user_id: self.load_or_create(identity).await?.0,
        })
    }

    /// Fetch the user's document, creating it first if absent.
    ///
    /// Returns `None` only when there is no authenticated user.
    pub async fn get_profile(&self, identity: Option<&UserIdentity>) -> Result<Option<UserDocument>> {
        let Some(identity) = identity else {
            return Ok(None);
        };
        if identity.user_id.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(self.load_or_create(identity).await?.1))
    }

    /// Set the mechanic contact address.
    pub async fn update_mechanic_email(&self, identity: &UserIdentity, email: &str) -> Result<()> {
        let doc = self.ensure_document(identity).await?;
        self.db
            .update_field(
                &doc.user_id,
                FieldUpdate::MechanicEmail(email.trim().to_string()),
            )
            .await?;
        tracing::info!(user_id = %doc.user_id, "Mechanic email updated");
        Ok(())
    }

    /// Set the display name.
    pub async fn update_display_name(&self, identity: &UserIdentity, name: &str) -> Result<()> {
        let doc = self.ensure_document(identity).await?;
        self.db
            .update_field(&doc.user_id, FieldUpdate::DisplayName(name.trim().to_string()))
            .await?;
        tracing::info!(user_id = %doc.user_id, "Display name updated");
        Ok(())
    }

    /// Read the document, creating it if needed. Returns the trimmed user ID
    /// together with the current contents.
    pub(crate) async fn load_or_create(
        &self,
        identity: &UserIdentity,
    ) -> Result<(String, UserDocument)> {
        let user_id = require_user(&identity.user_id)?.to_string();

        if let Some(doc) = self.db.get_user(&user_id).await? {
            return Ok((user_id, doc));
        }

        let fresh = UserDocument::new_for(identity);
        if self.db.create_user_if_absent(&user_id, &fresh).await? {
            tracing::info!(user_id = %user_id, "Created user document");
            return Ok((user_id, fresh));
        }

        // Lost a creation race; read back the winner's document.
        let doc = self.db.get_user(&user_id).await?.ok_or_else(|| {
            AppError::StoreUnavailable(format!("User document {} vanished after create", user_id))
        })?;
        Ok((user_id, doc))
    }
}

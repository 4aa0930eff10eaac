// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed registration operations.
//!
//! Registrations are private per player: each record lives in a nested
//! collection under `artifacts/{app_id}/users/{uid}`, and the document id
//! is fixed so at most one record exists per identity.

use crate::db::paths;
use crate::error::AppError;
use crate::models::RegistrationRecord;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // The emulator accepts any bearer token, so supply a static one
        // instead of looking up real credentials.
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
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Registration Operations ─────────────────────────────────

    /// List all registration documents for one identity.
    ///
    /// Only one document is ever expected, because writes use a fixed
    /// document id; callers take the first.
    pub async fn list_registrations(
        &self,
        app_id: &str,
        uid: &str,
    ) -> Result<Vec<RegistrationRecord>, AppError> {
        let client = self.get_client()?;

        let parent = client
            .parent_path(paths::ARTIFACTS, app_id)
            .and_then(|p| p.at(paths::USERS, uid))
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .select()
            .from(paths::REGISTRATIONS)
            .parent(&parent)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write (or overwrite) the registration record for one identity.
    pub async fn set_registration(
        &self,
        app_id: &str,
        uid: &str,
        record: &RegistrationRecord,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;

        let parent = client
            .parent_path(paths::ARTIFACTS, app_id)
            .and_then(|p| p.at(paths::USERS, uid))
            .map_err(|e| AppError::Database(e.to_string()))?;

        let _: () = client
            .fluent()
            .update()
            .in_col(paths::REGISTRATIONS)
            .document_id(paths::REGISTRATION_DOC_ID)
            .parent(&parent)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(
            uid,
            doc_id = paths::REGISTRATION_DOC_ID,
            "Registration record stored"
        );

        Ok(())
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration status checks and submissions.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{RegistrationForm, RegistrationRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether the current identity has already registered.
#[derive(Debug, Clone)]
pub enum RegistrationStatus {
    /// No record yet; the form should accept a submission
    Open,
    /// A record exists; the form is locked to its contents
    Confirmed(RegistrationRecord),
}

/// Service for reading and writing registration records.
#[derive(Clone)]
pub struct RegistrationService {
    db: FirestoreDb,
    app_id: String,
    in_flight: Arc<AtomicBool>,
}

/// Releases the in-flight submission slot when dropped, so an early
/// return on any error path re-enables submission.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl RegistrationService {
    pub fn new(db: FirestoreDb, app_id: &str) -> Self {
        Self {
            db,
            app_id: app_id.to_string(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Query the identity's private collection for an existing record.
    ///
    /// More than one document is never expected (writes use a fixed
    /// document id); if it happens anyway, the first one wins.
    pub async fn check_status(&self, uid: &str) -> Result<RegistrationStatus, AppError> {
        let records = self.db.list_registrations(&self.app_id, uid).await?;

        match records.into_iter().next() {
            Some(record) => Ok(RegistrationStatus::Confirmed(record)),
            None => Ok(RegistrationStatus::Open),
        }
    }

    /// Validate and store a submission, overwriting any prior record for
    /// this identity.
    ///
    /// At most one submission is in flight at a time: the slot is claimed
    /// before validation starts and released when this call returns, the
    /// same way the original form disabled its submit control before any
    /// asynchronous work.
    pub async fn submit(
        &self,
        uid: &str,
        form: RegistrationForm,
    ) -> Result<RegistrationRecord, AppError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::SubmissionInFlight);
        }
        let _guard = InFlightGuard(self.in_flight.clone());

        // No write happens on validation failure
        let form = form.validated()?;
        let record = form.into_record(uid, chrono::Utc::now());

        self.db
            .set_registration(&self.app_id, uid, &record)
            .await?;

        tracing::info!(
            uid,
            player_name = %record.player_name,
            platform = %record.platform,
            "Registration stored"
        );

        Ok(record)
    }
}

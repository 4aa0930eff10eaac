// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;
use tourney_registration::config::Config;
use tourney_registration::countdown::CountdownClock;
use tourney_registration::db::FirestoreDb;
use tourney_registration::routes::create_router;
use tourney_registration::services::{AuthEvent, RegistrationService, SessionTracker};
use tourney_registration::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Uid used by the signed-in test apps.
#[allow(dead_code)]
pub const TEST_UID: &str = "abcdefghijklmnop";

/// Create a test app with offline mock dependencies and a session that
/// has not resolved sign-in yet.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(test_db_offline(), SessionTracker::new(), CountdownClock::new())
}

/// Create a test app whose session is already signed in as [`TEST_UID`].
#[allow(dead_code)]
pub fn create_signed_in_app() -> (axum::Router, Arc<AppState>) {
    let session = SessionTracker::new();
    session.reconcile(&AuthEvent::SignedIn {
        uid: TEST_UID.to_string(),
    });
    build_app(test_db_offline(), session, CountdownClock::new())
}

/// Create a signed-in test app whose registration deadline has passed.
#[allow(dead_code)]
pub fn create_closed_app() -> (axum::Router, Arc<AppState>) {
    let session = SessionTracker::new();
    session.reconcile(&AuthEvent::SignedIn {
        uid: TEST_UID.to_string(),
    });
    build_app(test_db_offline(), session, CountdownClock::new_closed())
}

#[allow(dead_code)]
fn build_app(
    db: FirestoreDb,
    session: SessionTracker,
    countdown: CountdownClock,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let registration = RegistrationService::new(db.clone(), &config.app_id);

    let state = Arc::new(AppState {
        config,
        db,
        session,
        registration,
        countdown: Arc::new(countdown),
    });

    (create_router(state.clone()), state)
}

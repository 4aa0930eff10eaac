// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tourney-Registration API Server
//!
//! Signs the session in against the Firebase Auth backend, serves the
//! registration form state from Firestore, and runs the deadline countdown.

use std::sync::Arc;
use tokio::sync::mpsc;
use tourney_registration::{
    config::Config,
    countdown::{self, CountdownClock},
    db::FirestoreDb,
    services::{auth::AuthClient, session, AuthEvent, RegistrationService, SessionTracker},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment. A missing Firebase config is
    // fatal: there is no recovery path until restart.
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        app_id = %config.app_id,
        "Starting Tourney-Registration API"
    );

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.firebase.project_id)
        .await
        .expect("Failed to connect to Firestore");

    let registration = RegistrationService::new(db.clone(), &config.app_id);
    let session_tracker = SessionTracker::new();

    // Identity-state events flow from the sign-in task to a single
    // reconciliation routine
    let (auth_tx, auth_rx) = mpsc::unbounded_channel::<AuthEvent>();
    tokio::spawn(session::run(
        auth_rx,
        session_tracker.clone(),
        registration.clone(),
    ));

    // Sign in with the environment-supplied custom token, falling back to
    // anonymous identity. No retry on failure.
    let auth_client = AuthClient::new(&config.firebase.api_key);
    let initial_token = config.initial_auth_token.clone();
    tokio::spawn(async move {
        let event = match auth_client.sign_in(initial_token.as_deref()).await {
            Ok(identity) => AuthEvent::SignedIn { uid: identity.uid },
            Err(e) => AuthEvent::Error(e.to_string()),
        };
        let _ = auth_tx.send(event);
    });

    // Start the deadline countdown ticker
    let countdown_clock = Arc::new(CountdownClock::new());
    tokio::spawn(countdown::run(countdown_clock.clone()));
    tracing::info!("Countdown ticker started");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        session: session_tracker,
        registration,
        countdown: countdown_clock,
    });

    // Build router
    let app = tourney_registration::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tourney_registration=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Tourney-Registration: one-time tournament entry registration
//!
//! This crate provides the backend API for a tournament registration form:
//! session sign-in against the Firebase Auth backend, a one-record-per-player
//! registration store in Firestore, and a countdown to the registration
//! deadline.

pub mod config;
pub mod countdown;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use countdown::CountdownClock;
use db::FirestoreDb;
use services::{RegistrationService, SessionTracker};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub session: SessionTracker,
    pub registration: RegistrationService,
    pub countdown: Arc<CountdownClock>,
}

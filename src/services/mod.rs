// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod auth;
pub mod registration;
pub mod session;

pub use auth::AuthClient;
pub use registration::{RegistrationService, RegistrationStatus};
pub use session::{AuthEvent, AuthStatus, SessionState, SessionTracker};

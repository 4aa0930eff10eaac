// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state reconciliation.
//!
//! Identity-state changes arrive as a sequence of [`AuthEvent`]s on a
//! channel and are consumed by a single reconciliation routine. The
//! resulting [`SessionState`] is the only session-wide mutable state:
//! handlers read snapshots of it instead of ambient globals.

use crate::services::registration::RegistrationService;
use crate::services::RegistrationStatus;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Identity-state change delivered by the auth backend.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn { uid: String },
    SignedOut,
    Error(String),
}

/// Visual state of the auth indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// Sign-in has not resolved yet
    Pending,
    /// Signed in, identity available
    Active,
    /// Sign-in failed; terminal until restart
    Failed,
}

impl AuthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStatus::Pending => "pending",
            AuthStatus::Active => "active",
            AuthStatus::Failed => "failed",
        }
    }
}

/// Session-wide auth state.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// True once sign-in has resolved at least once (success or failure)
    pub ready: bool,
    /// Current backend-assigned identity, if signed in
    pub identity: Option<String>,
    pub status: AuthStatus,
}

impl SessionState {
    fn new() -> Self {
        Self {
            ready: false,
            identity: None,
            status: AuthStatus::Pending,
        }
    }
}

/// Tracks the session state across event callbacks.
#[derive(Clone)]
pub struct SessionTracker {
    state: Arc<RwLock<SessionState>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::new())),
        }
    }

    /// Apply one identity-state event. Any resolution, including failure,
    /// marks the session ready.
    pub fn reconcile(&self, event: &AuthEvent) {
        let mut state = self.state.write().expect("session state lock poisoned");
        match event {
            AuthEvent::SignedIn { uid } => {
                tracing::info!(uid = %uid, "Authentication state changed: signed in");
                state.identity = Some(uid.clone());
                state.ready = true;
                state.status = AuthStatus::Active;
            }
            AuthEvent::SignedOut => {
                tracing::warn!("Authentication state changed: signed out");
                state.identity = None;
                state.ready = true;
                state.status = AuthStatus::Failed;
            }
            AuthEvent::Error(msg) => {
                tracing::error!(error = %msg, "Authentication failed");
                state.identity = None;
                state.ready = true;
                state.status = AuthStatus::Failed;
            }
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .expect("session state lock poisoned")
            .clone()
    }

    pub fn identity(&self) -> Option<String> {
        self.state
            .read()
            .expect("session state lock poisoned")
            .identity
            .clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.read().expect("session state lock poisoned").ready
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Consume the identity-event stream until the sender side closes.
///
/// On sign-in the registration status check runs immediately, so the UI
/// converges before the player touches the form. Ordering is guaranteed by
/// construction: no status check can happen before an identity exists.
pub async fn run(
    mut rx: mpsc::UnboundedReceiver<AuthEvent>,
    tracker: SessionTracker,
    registration: RegistrationService,
) {
    while let Some(event) = rx.recv().await {
        tracker.reconcile(&event);

        if let AuthEvent::SignedIn { uid } = &event {
            match registration.check_status(uid).await {
                Ok(RegistrationStatus::Confirmed(record)) => {
                    tracing::info!(
                        player_name = %record.player_name,
                        "Existing registration found for session"
                    );
                }
                Ok(RegistrationStatus::Open) => {
                    tracing::info!("No registration yet for session");
                }
                Err(e) => {
                    // Transient: surfaced to the user on their next status
                    // request, no retry here
                    tracing::warn!(error = %e, "Registration status check failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_not_ready() {
        let tracker = SessionTracker::new();
        let state = tracker.snapshot();
        assert!(!state.ready);
        assert!(state.identity.is_none());
        assert_eq!(state.status, AuthStatus::Pending);
    }

    #[test]
    fn test_signed_in_sets_identity_and_ready() {
        let tracker = SessionTracker::new();
        tracker.reconcile(&AuthEvent::SignedIn {
            uid: "abcdefghijklmnop".to_string(),
        });

        let state = tracker.snapshot();
        assert!(state.ready);
        assert_eq!(state.identity.as_deref(), Some("abcdefghijklmnop"));
        assert_eq!(state.status, AuthStatus::Active);
    }

    #[test]
    fn test_error_marks_ready_but_failed() {
        let tracker = SessionTracker::new();
        tracker.reconcile(&AuthEvent::Error("backend down".to_string()));

        let state = tracker.snapshot();
        assert!(state.ready);
        assert!(state.identity.is_none());
        assert_eq!(state.status, AuthStatus::Failed);
    }

    #[test]
    fn test_sign_out_clears_identity() {
        let tracker = SessionTracker::new();
        tracker.reconcile(&AuthEvent::SignedIn {
            uid: "abcdefghijklmnop".to_string(),
        });
        tracker.reconcile(&AuthEvent::SignedOut);

        let state = tracker.snapshot();
        assert!(state.identity.is_none());
        assert_eq!(state.status, AuthStatus::Failed);
    }
}

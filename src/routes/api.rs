// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: session view, registration status, submission, countdown.
//!
//! The handlers return view models rather than markup; the hosting page
//! renders them. Core behavior (validation, record shaping, countdown
//! math) lives in `models`, `services`, and `countdown` and is testable
//! without any of this.

use crate::countdown::CountdownView;
use crate::error::Result;
use crate::models::identity::format_player_id;
use crate::models::registration::{RegistrationRecord, DEFAULT_PLATFORM, PLATFORM_OPTIONS};
use crate::models::RegistrationForm;
use crate::services::{AuthStatus, RegistrationStatus};
use crate::AppState;
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Shown when no registration exists yet.
pub const PROMPT_MESSAGE: &str = "Please complete the form to secure your spot.";

/// Shown when a status-check read fails; does not change form enablement.
pub const STATUS_CHECK_FAILED_MESSAGE: &str = "Database status check failed.";

/// Shown in place of the formatted id while sign-in is failed.
pub const AUTH_ERROR_DISPLAY: &str = "AUTH-ERROR-WAITING";

/// Default profile picture when no usable URL is stored.
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://placehold.co/60x60/E0F2F1/1D4ED8?text=P";

const LABEL_FINALIZE: &str = "Finalize Registration";
const LABEL_CONFIRMED: &str = "REGISTRATION CONFIRMED";
const LABEL_CLOSED: &str = "Registration Closed";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route(
            "/api/registration",
            get(get_registration).post(submit_registration),
        )
        .route("/api/countdown", get(get_countdown))
}

// ─── Session ─────────────────────────────────────────────────

/// Current session view.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    /// True once sign-in has resolved (success or failure)
    pub ready: bool,
    /// "pending" | "active" | "failed"
    pub auth_status: String,
    /// Shortened player id, or a sentinel while unavailable
    pub player_id_display: String,
    /// Wording for the auth indicator
    pub status_label: String,
}

async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.session.snapshot();

    let player_id_display = match session.status {
        AuthStatus::Failed => AUTH_ERROR_DISPLAY.to_string(),
        _ => format_player_id(session.identity.as_deref()),
    };

    let status_label = match session.status {
        AuthStatus::Pending => "Checking Authentication...",
        AuthStatus::Active => "Signed In (Active)",
        AuthStatus::Failed => "Sign-In Failed",
    };

    Json(SessionResponse {
        ready: session.ready,
        auth_status: session.status.as_str().to_string(),
        player_id_display,
        status_label: status_label.to_string(),
    })
}

// ─── Registration ────────────────────────────────────────────

/// Form rendering state.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormView {
    pub player_name: String,
    pub contact_number: String,
    pub profile_picture_url: String,
    pub platform: String,
    pub platform_options: Vec<String>,
    pub inputs_disabled: bool,
    pub submit_enabled: bool,
    pub submit_label: String,
    /// Resolved image source (stored URL or placeholder)
    pub profile_picture_src: String,
}

impl FormView {
    /// Empty, editable form. A closed countdown overrides enablement.
    fn open(closed: bool) -> Self {
        Self {
            player_name: String::new(),
            contact_number: String::new(),
            profile_picture_url: String::new(),
            platform: DEFAULT_PLATFORM.to_string(),
            platform_options: platform_options(),
            inputs_disabled: false,
            submit_enabled: !closed,
            submit_label: if closed { LABEL_CLOSED } else { LABEL_FINALIZE }.to_string(),
            profile_picture_src: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }

    /// Populated and locked to an existing record.
    fn confirmed(record: &RegistrationRecord, closed: bool) -> Self {
        let src = if record.profile_picture_url.is_empty() {
            DEFAULT_PLACEHOLDER_URL.to_string()
        } else {
            record.profile_picture_url.clone()
        };

        Self {
            player_name: record.player_name.clone(),
            contact_number: record.contact_number.clone(),
            profile_picture_url: record.profile_picture_url.clone(),
            platform: record.platform.clone(),
            platform_options: platform_options(),
            inputs_disabled: true,
            submit_enabled: false,
            submit_label: if closed { LABEL_CLOSED } else { LABEL_CONFIRMED }.to_string(),
            profile_picture_src: src,
        }
    }
}

fn platform_options() -> Vec<String> {
    PLATFORM_OPTIONS.iter().map(|p| p.to_string()).collect()
}

fn welcome_message(player_name: &str) -> String {
    format!("Welcome back, {}. Registration confirmed.", player_name)
}

fn success_message(player_name: &str) -> String {
    format!(
        "Registration successful for {}! Welcome to the tournament.",
        player_name
    )
}

/// Registration status view.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegistrationStatusResponse {
    pub registered: bool,
    pub message: String,
    pub form: FormView,
}

/// Check whether the current session has already registered.
///
/// A read failure is reported in the message without changing the form's
/// enablement, and is deliberately not an error status.
async fn get_registration(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RegistrationStatusResponse>> {
    let session = state.session.snapshot();
    if !session.ready {
        return Err(crate::error::AppError::NotReady);
    }
    let uid = session
        .identity
        .ok_or_else(|| crate::error::AppError::AuthFailed("User not authenticated".to_string()))?;

    let closed = state.countdown.is_closed();

    let response = match state.registration.check_status(&uid).await {
        Ok(RegistrationStatus::Confirmed(record)) => RegistrationStatusResponse {
            registered: true,
            message: welcome_message(&record.player_name),
            form: FormView::confirmed(&record, closed),
        },
        Ok(RegistrationStatus::Open) => RegistrationStatusResponse {
            registered: false,
            message: PROMPT_MESSAGE.to_string(),
            form: FormView::open(closed),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Registration status check failed");
            RegistrationStatusResponse {
                registered: false,
                message: STATUS_CHECK_FAILED_MESSAGE.to_string(),
                form: FormView::open(closed),
            }
        }
    };

    Ok(Json(response))
}

/// Submission result, including the converged status view.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub status: RegistrationStatusResponse,
}

/// Handle a registration submission.
async fn submit_registration(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<SubmitResponse>> {
    // The deadline latch overrides everything else
    if state.countdown.is_closed() {
        return Err(crate::error::AppError::RegistrationClosed);
    }

    let session = state.session.snapshot();
    if !session.ready || session.identity.is_none() {
        return Err(crate::error::AppError::NotReady);
    }
    let uid = session.identity.unwrap_or_default();

    let record = state.registration.submit(&uid, form).await?;
    let message = success_message(&record.player_name);

    // Re-run the status check so the returned view matches what a fresh
    // read would show
    let status = match state.registration.check_status(&uid).await {
        Ok(RegistrationStatus::Confirmed(stored)) => RegistrationStatusResponse {
            registered: true,
            message: welcome_message(&stored.player_name),
            form: FormView::confirmed(&stored, false),
        },
        _ => RegistrationStatusResponse {
            registered: true,
            message: welcome_message(&record.player_name),
            form: FormView::confirmed(&record, false),
        },
    };

    Ok(Json(SubmitResponse {
        success: true,
        message,
        status,
    }))
}

// ─── Countdown ───────────────────────────────────────────────

async fn get_countdown(State(state): State<Arc<AppState>>) -> Json<CountdownView> {
    Json(state.countdown.view())
}

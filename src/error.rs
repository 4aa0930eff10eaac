// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication is still loading. Please wait a moment.")]
    NotReady,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("{0}")]
    Validation(String),

    #[error("Registration Closed")]
    RegistrationClosed,

    #[error("Another submission is already being processed")]
    SubmissionInFlight,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "auth_pending",
                Some(self.to_string()),
            ),
            AppError::AuthFailed(msg) => {
                (StatusCode::UNAUTHORIZED, "auth_failed", Some(msg.clone()))
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", Some(msg.clone()))
            }
            AppError::RegistrationClosed => (
                StatusCode::CONFLICT,
                "registration_closed",
                Some(self.to_string()),
            ),
            AppError::SubmissionInFlight => (
                StatusCode::CONFLICT,
                "submission_in_flight",
                Some("Processing...".to_string()),
            ),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                // The write path surfaces the reason so the user can retry
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    Some(format!("Registration failed: {}. Please try again.", msg)),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

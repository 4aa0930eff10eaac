// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session view tests: readiness, id formatting, auth indicator states.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tourney_registration::services::AuthEvent;
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_session_pending_before_sign_in() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ready"], false);
    assert_eq!(json["auth_status"], "pending");
    assert_eq!(json["player_id_display"], "UNASSIGNED-ID");
    assert_eq!(json["status_label"], "Checking Authentication...");
}

#[tokio::test]
async fn test_session_active_after_sign_in() {
    let (app, _) = common::create_signed_in_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ready"], true);
    assert_eq!(json["auth_status"], "active");
    // first 4 uppercased + last 9 of "abcdefghijklmnop"
    assert_eq!(json["player_id_display"], "ABCD-hijklmnop");
    assert_eq!(json["status_label"], "Signed In (Active)");
}

#[tokio::test]
async fn test_session_failed_after_auth_error() {
    let (app, state) = common::create_test_app();
    state
        .session
        .reconcile(&AuthEvent::Error("backend down".to_string()));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ready"], true);
    assert_eq!(json["auth_status"], "failed");
    assert_eq!(json["player_id_display"], "AUTH-ERROR-WAITING");
    assert_eq!(json["status_label"], "Sign-In Failed");
}

#[tokio::test]
async fn test_health_requires_no_session() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_registration_view_unavailable_before_readiness() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/registration")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

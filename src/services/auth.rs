// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Auth REST client.
//!
//! Performs the one-shot session sign-in: with the environment-supplied
//! custom token when present, anonymously otherwise. There is no retry;
//! a sign-in failure is terminal for the session.

use crate::error::AppError;
use serde::Deserialize;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Identity established by a successful sign-in.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    /// Opaque uid assigned by the auth backend
    pub uid: String,
}

/// Auth backend client.
#[derive(Clone)]
pub struct AuthClient {
    http: Option<reqwest::Client>,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct SignUpResponse {
    #[serde(rename = "localId")]
    local_id: String,
}

#[derive(Deserialize)]
struct CustomTokenResponse {
    #[serde(rename = "idToken")]
    id_token: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
}

impl AuthClient {
    /// Create a new auth client for the given Firebase API key.
    pub fn new(api_key: &str) -> Self {
        Self {
            http: Some(reqwest::Client::new()),
            api_key: api_key.to_string(),
            base_url: IDENTITY_TOOLKIT_URL.to_string(),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// `sign_in` resolves to the given uid without any network calls.
    pub fn new_mock(uid: &str) -> Self {
        Self {
            http: None,
            api_key: uid.to_string(),
            base_url: String::new(),
        }
    }

    fn get_http(&self) -> Result<&reqwest::Client, AppError> {
        self.http
            .as_ref()
            .ok_or_else(|| AppError::AuthFailed("Auth backend not connected".to_string()))
    }

    /// Sign in with the supplied custom token, or anonymously when absent.
    pub async fn sign_in(&self, custom_token: Option<&str>) -> Result<AuthIdentity, AppError> {
        if self.http.is_none() {
            // Mock mode: the stored key doubles as the canned uid
            return Ok(AuthIdentity {
                uid: self.api_key.clone(),
            });
        }

        match custom_token {
            Some(token) => {
                let identity = self.sign_in_with_custom_token(token).await?;
                tracing::info!("Signed in with custom token (preferred)");
                Ok(identity)
            }
            None => {
                let identity = self.sign_in_anonymously().await?;
                tracing::info!("Signed in anonymously (fallback)");
                Ok(identity)
            }
        }
    }

    /// Anonymous sign-in via `accounts:signUp`.
    async fn sign_in_anonymously(&self) -> Result<AuthIdentity, AppError> {
        let url = format!("{}/accounts:signUp?key={}", self.base_url, self.api_key);

        let response = self
            .get_http()?
            .post(&url)
            .json(&serde_json::json!({ "returnSecureToken": true }))
            .send()
            .await
            .map_err(|e| AppError::AuthFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AuthFailed(format!(
                "Anonymous sign-in rejected: HTTP {}",
                response.status()
            )));
        }

        let body: SignUpResponse = response
            .json()
            .await
            .map_err(|e| AppError::AuthFailed(e.to_string()))?;

        Ok(AuthIdentity { uid: body.local_id })
    }

    /// Custom-token sign-in via `accounts:signInWithCustomToken`.
    ///
    /// That endpoint only returns an id token, so a follow-up
    /// `accounts:lookup` resolves the uid.
    async fn sign_in_with_custom_token(&self, token: &str) -> Result<AuthIdentity, AppError> {
        let url = format!(
            "{}/accounts:signInWithCustomToken?key={}",
            self.base_url, self.api_key
        );

        let response = self
            .get_http()?
            .post(&url)
            .json(&serde_json::json!({
                "token": token,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(|e| AppError::AuthFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AuthFailed(format!(
                "Custom token sign-in rejected: HTTP {}",
                response.status()
            )));
        }

        let body: CustomTokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::AuthFailed(e.to_string()))?;

        self.lookup_uid(&body.id_token).await
    }

    async fn lookup_uid(&self, id_token: &str) -> Result<AuthIdentity, AppError> {
        let url = format!("{}/accounts:lookup?key={}", self.base_url, self.api_key);

        let response = self
            .get_http()?
            .post(&url)
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await
            .map_err(|e| AppError::AuthFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AuthFailed(format!(
                "Account lookup rejected: HTTP {}",
                response.status()
            )));
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| AppError::AuthFailed(e.to_string()))?;

        body.users
            .into_iter()
            .next()
            .map(|u| AuthIdentity { uid: u.local_id })
            .ok_or_else(|| AppError::AuthFailed("Account lookup returned no users".to_string()))
    }
}

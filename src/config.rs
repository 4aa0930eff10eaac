//! Application configuration supplied by the hosting environment.
//!
//! The hosting environment provides three things: an application identifier,
//! a Firebase configuration object (as a JSON string), and an optional
//! one-time sign-in token. A missing or empty Firebase configuration is a
//! fatal initialization error; a missing token falls back to anonymous
//! sign-in.

use serde::Deserialize;
use std::env;

/// Fallback application id when the environment does not provide one.
pub const DEFAULT_APP_ID: &str = "default-efpbd-app-id";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application identifier (namespaces all Firestore paths)
    pub app_id: String,
    /// Parsed Firebase backend configuration
    pub firebase: FirebaseConfig,
    /// One-time custom sign-in token, if the environment supplied one
    pub initial_auth_token: Option<String>,
    /// Hosting page URL, for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

/// Firebase project configuration, parsed from the `FIREBASE_CONFIG`
/// JSON string (same shape the Firebase web SDK consumes).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    #[serde(default)]
    pub auth_domain: Option<String>,
    #[serde(default)]
    pub storage_bucket: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let raw_firebase =
            env::var("FIREBASE_CONFIG").map_err(|_| ConfigError::Missing("FIREBASE_CONFIG"))?;
        if raw_firebase.trim().is_empty() || raw_firebase.trim() == "{}" {
            return Err(ConfigError::Missing("FIREBASE_CONFIG"));
        }

        let firebase: FirebaseConfig = serde_json::from_str(&raw_firebase)
            .map_err(|e| ConfigError::Invalid("FIREBASE_CONFIG", e.to_string()))?;

        Ok(Self {
            app_id: env::var("APP_ID").unwrap_or_else(|_| DEFAULT_APP_ID.to_string()),
            firebase,
            initial_auth_token: env::var("INITIAL_AUTH_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            firebase: FirebaseConfig {
                api_key: "test-api-key".to_string(),
                project_id: "test-project".to_string(),
                auth_domain: None,
                storage_bucket: None,
                app_id: None,
            },
            initial_auth_token: None,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firebase_config_parses_camel_case() {
        let raw = r#"{
            "apiKey": "AIzaTest",
            "projectId": "efpbd-tournament",
            "authDomain": "efpbd-tournament.firebaseapp.com"
        }"#;

        let parsed: FirebaseConfig = serde_json::from_str(raw).expect("Config should parse");
        assert_eq!(parsed.api_key, "AIzaTest");
        assert_eq!(parsed.project_id, "efpbd-tournament");
        assert_eq!(
            parsed.auth_domain.as_deref(),
            Some("efpbd-tournament.firebaseapp.com")
        );
    }

    #[test]
    fn test_malformed_firebase_config_rejected() {
        let parsed: Result<FirebaseConfig, _> = serde_json::from_str("not a config");
        assert!(parsed.is_err());

        // apiKey/projectId are required fields
        let parsed: Result<FirebaseConfig, _> = serde_json::from_str(r#"{"apiKey":"k"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_config_from_env() {
        env::set_var(
            "FIREBASE_CONFIG",
            r#"{"apiKey":"k","projectId":"test-project"}"#,
        );
        env::set_var("APP_ID", "env-app-id");
        env::remove_var("INITIAL_AUTH_TOKEN");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.app_id, "env-app-id");
        assert_eq!(config.firebase.project_id, "test-project");
        assert!(config.initial_auth_token.is_none());
        assert_eq!(config.port, 8080);
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration record and form validation.

use crate::error::AppError;
use crate::models::identity::format_player_id;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Platform choices offered by the form.
pub const PLATFORM_OPTIONS: &[&str] = &["Mobile", "PC", "Console"];

/// Platform used when the form omits one.
pub const DEFAULT_PLATFORM: &str = "Mobile";

/// Validation message when any of the three text fields is empty.
pub const MANDATORY_FIELDS_MESSAGE: &str =
    "All fields (including Profile Picture URL) are mandatory.";

/// Validation message when the picture URL does not start with "http".
pub const PICTURE_URL_MESSAGE: &str =
    "Profile Picture must be a valid public URL (start with http:// or https://).";

/// One registration document per player, stored under the player's
/// private Firestore path. Field names match the original wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Full backend uid (also the owner of the document path)
    pub user_id: String,
    /// Shortened display form of the uid
    pub formatted_player_id: String,
    pub player_name: String,
    pub contact_number: String,
    pub profile_picture_url: String,
    pub platform: String,
    /// ISO-8601 creation timestamp
    pub registered_at: String,
}

/// Incoming registration submission.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[validate(length(min = 1, code = "mandatory"))]
    pub player_name: String,
    #[validate(length(min = 1, code = "mandatory"))]
    pub contact_number: String,
    #[validate(
        length(min = 1, code = "mandatory"),
        custom(function = "picture_url_is_public")
    )]
    pub profile_picture_url: String,
    /// Has a default and is not emptiness-checked
    #[serde(default = "default_platform")]
    pub platform: String,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

/// The URL only needs to be publicly fetchable, so the check is just the
/// scheme prefix. Emptiness is reported by the mandatory check instead.
fn picture_url_is_public(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() || url.starts_with("http") {
        Ok(())
    } else {
        Err(ValidationError::new("picture_url"))
    }
}

impl RegistrationForm {
    /// Trim whitespace from the text fields and apply the platform default.
    pub fn normalized(mut self) -> Self {
        self.player_name = self.player_name.trim().to_string();
        self.contact_number = self.contact_number.trim().to_string();
        self.profile_picture_url = self.profile_picture_url.trim().to_string();
        let platform = self.platform.trim();
        self.platform = if platform.is_empty() {
            DEFAULT_PLATFORM.to_string()
        } else {
            platform.to_string()
        };
        self
    }

    /// Normalize and validate, mapping validator output to the two
    /// user-visible messages.
    pub fn validated(self) -> Result<Self, AppError> {
        let form = self.normalized();
        match form.validate() {
            Ok(()) => Ok(form),
            Err(errors) => {
                let mandatory = errors
                    .field_errors()
                    .values()
                    .flat_map(|field| field.iter())
                    .any(|e| e.code == "mandatory");

                if mandatory {
                    Err(AppError::Validation(MANDATORY_FIELDS_MESSAGE.to_string()))
                } else {
                    Err(AppError::Validation(PICTURE_URL_MESSAGE.to_string()))
                }
            }
        }
    }

    /// Build the stored record for this submission.
    pub fn into_record(self, user_id: &str, registered_at: DateTime<Utc>) -> RegistrationRecord {
        RegistrationRecord {
            user_id: user_id.to_string(),
            formatted_player_id: format_player_id(Some(user_id)),
            player_name: self.player_name,
            contact_number: self.contact_number,
            profile_picture_url: self.profile_picture_url,
            platform: self.platform,
            registered_at: registered_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            player_name: "Ada".to_string(),
            contact_number: "555-0100".to_string(),
            profile_picture_url: "http://x.test/a.png".to_string(),
            platform: "PC".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let form = valid_form().validated().expect("should validate");
        assert_eq!(form.player_name, "Ada");
        assert_eq!(form.platform, "PC");
    }

    #[test]
    fn test_empty_name_rejected() {
        let form = RegistrationForm {
            player_name: "  ".to_string(),
            ..valid_form()
        };
        let err = form.validated().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == MANDATORY_FIELDS_MESSAGE));
    }

    #[test]
    fn test_empty_contact_rejected() {
        let form = RegistrationForm {
            contact_number: String::new(),
            ..valid_form()
        };
        let err = form.validated().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == MANDATORY_FIELDS_MESSAGE));
    }

    #[test]
    fn test_empty_picture_url_rejected_as_mandatory() {
        let form = RegistrationForm {
            profile_picture_url: String::new(),
            ..valid_form()
        };
        let err = form.validated().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == MANDATORY_FIELDS_MESSAGE));
    }

    #[test]
    fn test_non_http_picture_url_rejected() {
        let form = RegistrationForm {
            profile_picture_url: "ftp://x.test/a.png".to_string(),
            ..valid_form()
        };
        let err = form.validated().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == PICTURE_URL_MESSAGE));
    }

    #[test]
    fn test_https_picture_url_accepted() {
        let form = RegistrationForm {
            profile_picture_url: "https://x.test/a.png".to_string(),
            ..valid_form()
        };
        assert!(form.validated().is_ok());
    }

    #[test]
    fn test_platform_defaults_when_blank() {
        let form = RegistrationForm {
            platform: "   ".to_string(),
            ..valid_form()
        };
        let form = form.validated().expect("should validate");
        assert_eq!(form.platform, DEFAULT_PLATFORM);
    }

    #[test]
    fn test_form_deserializes_with_platform_default() {
        let form: RegistrationForm = serde_json::from_str(
            r#"{
                "playerName": "Ada",
                "contactNumber": "555-0100",
                "profilePictureUrl": "http://x.test/a.png"
            }"#,
        )
        .expect("should deserialize");
        assert_eq!(form.platform, DEFAULT_PLATFORM);
    }

    #[test]
    fn test_into_record_carries_all_fields() {
        let now = chrono::Utc::now();
        let record = valid_form().into_record("abcdefghijklmnop", now);

        assert_eq!(record.user_id, "abcdefghijklmnop");
        assert_eq!(record.formatted_player_id, "ABCD-hijklmnop");
        assert_eq!(record.player_name, "Ada");
        assert_eq!(record.contact_number, "555-0100");
        assert_eq!(record.profile_picture_url, "http://x.test/a.png");
        assert_eq!(record.platform, "PC");
        assert!(record.registered_at.ends_with('Z'));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = valid_form().into_record("abcdefghijklmnop", chrono::Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("playerName").is_some());
        assert!(json.get("formattedPlayerId").is_some());
        assert!(json.get("registeredAt").is_some());
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display formatting for backend-assigned player identities.
//!
//! The auth backend assigns an opaque uid per session. The uid itself is
//! used for all database paths; only the shortened form is ever shown to
//! the player.

/// Shown whenever no usable identity is available.
pub const UNASSIGNED_ID: &str = "UNASSIGNED-ID";

/// Convert the full backend uid into the shortened display form:
/// uppercased first 4 characters, a dash, then the last 9 characters.
///
/// Uids shorter than 10 characters (or absent) fall back to
/// [`UNASSIGNED_ID`].
pub fn format_player_id(uid: Option<&str>) -> String {
    let Some(uid) = uid else {
        return UNASSIGNED_ID.to_string();
    };

    // Operate on chars so a multi-byte uid cannot split a boundary
    let chars: Vec<char> = uid.chars().collect();
    if chars.len() < 10 {
        return UNASSIGNED_ID.to_string();
    }

    let prefix: String = chars[..4].iter().collect::<String>().to_uppercase();
    let suffix: String = chars[chars.len() - 9..].iter().collect();
    format!("{}-{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_long_uid() {
        // last 9 of "abcdefghijklmnop" is "hijklmnop"
        assert_eq!(
            format_player_id(Some("abcdefghijklmnop")),
            "ABCD-hijklmnop"
        );
    }

    #[test]
    fn test_exactly_ten_chars() {
        assert_eq!(format_player_id(Some("abcdefghij")), "ABCD-bcdefghij");
    }

    #[test]
    fn test_short_uid_is_unassigned() {
        assert_eq!(format_player_id(Some("abc123xyz")), UNASSIGNED_ID);
        assert_eq!(format_player_id(Some("")), UNASSIGNED_ID);
    }

    #[test]
    fn test_absent_uid_is_unassigned() {
        assert_eq!(format_player_id(None), UNASSIGNED_ID);
    }

    #[test]
    fn test_prefix_already_uppercase() {
        assert_eq!(
            format_player_id(Some("XYZ9restofuid")),
            "XYZ9-restofuid"
        );
    }
}

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection and document names as constants.
///
/// Registrations live at
/// `artifacts/{app_id}/users/{uid}/registrations/{REGISTRATION_DOC_ID}`.
pub mod paths {
    pub const ARTIFACTS: &str = "artifacts";
    pub const USERS: &str = "users";
    pub const REGISTRATIONS: &str = "registrations";
    /// Fixed document name, so a second submission overwrites the first.
    pub const REGISTRATION_DOC_ID: &str = "efpbd_mobile_entry";
}

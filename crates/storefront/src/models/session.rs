//! Session types.
//!
//! The session is the redacted view of an identity that the UI is allowed to
//! see: name and email, never the password.

use serde::{Deserialize, Serialize};

use vital_harvest_core::Email;

use super::Identity;

/// The currently active identity, redacted.
///
/// Persisted under the `currentUser` store key while logged in; the key is
/// absent when anonymous. At most one session is active per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name of the logged-in user.
    pub name: String,
    /// Email of the logged-in user.
    pub email: Email,
}

impl From<&Identity> for Session {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
        }
    }
}

//! Identity domain types.

use serde::{Deserialize, Serialize};

use vital_harvest_core::Email;

/// A registered identity: display name plus credentials.
///
/// This is the persisted shape under the `users` store key. The email is the
/// unique key of the registry; there are no update or delete operations.
///
/// The password is held in cleartext because that is the persisted contract
/// of the registry (see DESIGN.md). Never hand this type to the UI - a
/// [`super::Session`] is the redacted view for that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Display name chosen at registration.
    pub name: String,
    /// Email address, unique across the registry.
    pub email: Email,
    /// Cleartext password, matched exactly on login.
    pub password: String,
}

impl Identity {
    /// Whether the given credentials match this identity exactly.
    #[must_use]
    pub fn matches(&self, email: &Email, password: &str) -> bool {
        self.email == *email && self.password == password
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            name: "Ali".to_owned(),
            email: Email::parse("ali@example.com").unwrap(),
            password: "hunter2".to_owned(),
        }
    }

    #[test]
    fn test_matches_exact_credentials() {
        let id = identity();
        assert!(id.matches(&Email::parse("ali@example.com").unwrap(), "hunter2"));
    }

    #[test]
    fn test_rejects_wrong_password() {
        let id = identity();
        assert!(!id.matches(&Email::parse("ali@example.com").unwrap(), "hunter3"));
    }

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_value(identity()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ali",
                "email": "ali@example.com",
                "password": "hunter2",
            })
        );
    }
}

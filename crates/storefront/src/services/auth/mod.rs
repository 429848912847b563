//! Session and identity management.
//!
//! Owns the registered identity list and the currently active session, both
//! persisted to the key-value store. The session is either Anonymous or
//! Authenticated; failed operations never change it.

mod error;

pub use error::AuthError;

use vital_harvest_core::Email;

use crate::models::{Identity, Session};
use crate::store::{KeyValueStore, keys};

/// Session and identity manager.
///
/// Persistence is best-effort: unreadable or unparseable store contents are
/// logged and treated as empty on load, and a failed write leaves the
/// in-memory state authoritative. No store problem is ever surfaced to the
/// user or fatal to the process.
pub struct AuthService {
    store: Box<dyn KeyValueStore>,
    identities: Vec<Identity>,
    session: Option<Session>,
}

impl AuthService {
    /// Create the service, restoring the identity registry and any previous
    /// session from the store.
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let identities = load_identities(store.as_ref());
        let session = load_session(store.as_ref());

        if let Some(session) = &session {
            tracing::info!(email = %session.email, "restored session");
        }

        Self {
            store,
            identities,
            session,
        }
    }

    /// Register a new identity and log it in.
    ///
    /// Appends to the persisted registry, then performs a regular login with
    /// the same credentials, so the resulting session is identical to the one
    /// a later `login` would produce.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] if the email is malformed.
    /// Returns [`AuthError::EmailTaken`] if the email is already registered;
    /// the registry is left unchanged.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let email = Email::parse(email)?;

        if self.identities.iter().any(|i| i.email == email) {
            return Err(AuthError::EmailTaken);
        }

        self.identities.push(Identity {
            name: name.to_owned(),
            email: email.clone(),
            password: password.to_owned(),
        });
        self.persist_identities();

        self.login(email.as_str(), password)
    }

    /// Log in with an exact email and password match.
    ///
    /// On success the redacted session becomes active and is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if no identity matches;
    /// the current session (if any) is left untouched.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        // A malformed email can never match a stored identity.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let identity = self
            .identities
            .iter()
            .find(|i| i.matches(&email, password))
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session::from(identity);
        self.session = Some(session.clone());
        self.persist_session(&session);
        Ok(session)
    }

    /// Log out, clearing the active session and its persisted record.
    ///
    /// No-op when anonymous.
    pub fn logout(&mut self) {
        if self.session.take().is_none() {
            return;
        }

        if let Err(e) = self.store.remove(keys::CURRENT_USER) {
            tracing::warn!(error = %e, "failed to remove persisted session");
        }
    }

    /// The active session, if authenticated.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The registered identities, in registration order.
    #[must_use]
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    fn persist_identities(&mut self) {
        let json = match serde_json::to_string(&self.identities) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize identity registry");
                return;
            }
        };

        if let Err(e) = self.store.set(keys::USERS, &json) {
            tracing::warn!(error = %e, "failed to persist identity registry");
        }
    }

    fn persist_session(&mut self, session: &Session) {
        let json = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize session");
                return;
            }
        };

        if let Err(e) = self.store.set(keys::CURRENT_USER, &json) {
            tracing::warn!(error = %e, "failed to persist session");
        }
    }
}

/// Best-effort load of the identity registry.
fn load_identities(store: &dyn KeyValueStore) -> Vec<Identity> {
    let raw = match store.get(keys::USERS) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read identity registry, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(identities) => identities,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable identity registry, starting empty");
            Vec::new()
        }
    }
}

/// Best-effort load of a previously persisted session.
fn load_session(store: &dyn KeyValueStore) -> Option<Session> {
    let raw = match store.get(keys::CURRENT_USER) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted session, staying anonymous");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "unparseable persisted session, staying anonymous");
            None
        }
    }
}

//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// These surface as inline form messages; none of them is fatal and nothing
/// is retried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format on registration.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] vital_harvest_core::EmailError),

    /// Invalid credentials (wrong email or password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An identity with this email is already registered.
    #[error("an account with this email already exists")]
    EmailTaken,
}

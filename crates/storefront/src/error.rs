//! Unified error handling.
//!
//! Front ends hold a single `AppError`; [`AppError::message`] is the
//! user-facing text, so internal detail stays out of the UI.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout composition failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// User-facing message for this error.
    ///
    /// Form-level errors get inline text; infrastructure errors are kept
    /// generic and left to the logs.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Auth(AuthError::EmailTaken) => {
                "An account with this email already exists".to_owned()
            }
            Self::Auth(AuthError::InvalidCredentials) => "Invalid email or password".to_owned(),
            Self::Auth(AuthError::InvalidEmail(_)) => {
                "Please enter a valid email address".to_owned()
            }
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_owned(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Config(_) | Self::Store(_) => "Something went wrong".to_owned(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AppError::NotFound("product 123".to_owned());
        assert_eq!(err.to_string(), "Not found: product 123");
    }

    #[test]
    fn test_auth_messages_are_form_friendly() {
        let err = AppError::Auth(AuthError::EmailTaken);
        assert_eq!(err.message(), "An account with this email already exists");

        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.message(), "Invalid email or password");
    }

    #[test]
    fn test_store_message_stays_generic() {
        let err = AppError::Store(StoreError::Io(std::io::Error::other("disk on fire")));
        assert_eq!(err.message(), "Something went wrong");
        assert!(!err.message().contains("disk"));
    }
}

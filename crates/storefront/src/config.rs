//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with shippable defaults:
//!
//! - `VH_DATA_DIR` - Directory holding the persisted key-value store
//!   (default: `data`)
//! - `VH_STORE_NAME` - Shop name used in order messages (default:
//!   `Vital Harvest`)
//! - `VH_ORDER_PHONE` - WhatsApp order line; must contain digits
//! - `VH_ORDER_EMAIL` - Order mailbox; must be a valid email address

use std::path::{Path, PathBuf};

use thiserror::Error;

use vital_harvest_core::Email;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_STORE_NAME: &str = "Vital Harvest";
const DEFAULT_ORDER_PHONE: &str = "+92 300 1234567";
const DEFAULT_ORDER_EMAIL: &str = "orders@vitalharvest.pk";

/// Name of the key-value store file inside the data directory.
const STORE_FILE: &str = "store.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the persisted key-value store.
    pub data_dir: PathBuf,
    /// Shop name, used in composed order messages.
    pub store_name: String,
    /// WhatsApp order line, as displayed (checkout sanitizes it for links).
    pub order_phone: String,
    /// Mailbox that receives email orders.
    pub order_email: Email,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("VH_DATA_DIR", DEFAULT_DATA_DIR));
        let store_name = get_env_or_default("VH_STORE_NAME", DEFAULT_STORE_NAME);

        let order_phone = get_env_or_default("VH_ORDER_PHONE", DEFAULT_ORDER_PHONE);
        validate_phone(&order_phone)
            .map_err(|e| ConfigError::InvalidEnvVar("VH_ORDER_PHONE".to_owned(), e))?;

        let order_email = Email::parse(&get_env_or_default("VH_ORDER_EMAIL", DEFAULT_ORDER_EMAIL))
            .map_err(|e| ConfigError::InvalidEnvVar("VH_ORDER_EMAIL".to_owned(), e.to_string()))?;

        Ok(Self {
            data_dir,
            store_name,
            order_phone,
            order_email,
        })
    }

    /// Path of the key-value store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    /// Configuration with built-in defaults, bypassing the environment.
    ///
    /// Used by tests and as the base for injected-backend setups where the
    /// data directory is irrelevant.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store_name: DEFAULT_STORE_NAME.to_owned(),
            order_phone: DEFAULT_ORDER_PHONE.to_owned(),
            // Infallible: the default is a valid address.
            order_email: Email::parse(DEFAULT_ORDER_EMAIL)
                .unwrap_or_else(|_| unreachable!("default order email is valid")),
        }
    }

    /// The same configuration with a different data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// A phone number must carry at least one digit to form a `wa.me` link.
fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.chars().any(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("must contain at least one digit".to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StorefrontConfig::defaults();
        assert_eq!(config.store_name, "Vital Harvest");
        assert!(validate_phone(&config.order_phone).is_ok());
    }

    #[test]
    fn test_store_path_joins_data_dir() {
        let config = StorefrontConfig::defaults().with_data_dir("/tmp/vh");
        assert_eq!(config.store_path(), PathBuf::from("/tmp/vh/store.json"));
    }

    #[test]
    fn test_validate_phone_rejects_digitless() {
        assert!(validate_phone("no digits here").is_err());
        assert!(validate_phone("+92 300 1234567").is_ok());
    }
}

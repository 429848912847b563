//! Services for the storefront.

pub mod auth;

pub use auth::AuthService;

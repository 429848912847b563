//! Vital Harvest Core - Shared types library.
//!
//! This crate provides common types used across all Vital Harvest components:
//! - `storefront` - Cart, session, routing, and checkout state
//! - `cli` - Terminal shell that drives the storefront state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persisted store access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Vital Harvest Storefront - client-side storefront state core.
//!
//! This crate owns everything that changes while a visitor browses the shop:
//! the cart, the login session, the current route, and the pending order
//! confirmation. Rendering is someone else's job - a front end (the `vh-cli`
//! shell, in this workspace) reads the state and draws it.
//!
//! # Architecture
//!
//! - [`catalog`] - Static, compiled-in product reference data
//! - [`cart`] - In-memory cart with derived totals (not persisted)
//! - [`services::auth`] - Identity registry and active session, persisted to
//!   a local key-value store
//! - [`routes`] - Typed routes parsed from location fragments
//! - [`checkout`] - Order summary text and WhatsApp / mailto deep links
//! - [`state`] - [`state::AppState`], the explicit context object front ends
//!   hold; mutations go through it, reads recompute from current state
//!
//! There is no server: "placing" an order composes a prefilled message and
//! hands off to an externally-installed messaging or email client. The only
//! persisted data are the identity registry and the active session, written
//! to a JSON key-value store ([`store`]) that stands in for browser-local
//! storage.
//!
//! All state is single-threaded: every mutation runs to completion inside one
//! event handler, so no locking is needed anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use error::AppError;
pub use state::AppState;

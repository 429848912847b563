//! Integration tests for Vital Harvest.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vital-harvest-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration, login, logout, session restore
//! - `cart_flow` - Cart mutations and derived totals
//! - `routing_flow` - Fragment dispatch and scroll reset
//! - `checkout_flow` - Order composition, deep links, dispatch lifecycle
//!
//! Everything runs against [`TestContext`]: a real [`AppState`] over an
//! injected in-memory store and location, so tests can watch exactly what
//! gets persisted and which fragment the router writes.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::cell::RefCell;
use std::rc::Rc;

use vital_harvest_storefront::AppState;
use vital_harvest_storefront::checkout::BillingDetails;
use vital_harvest_storefront::config::StorefrontConfig;
use vital_harvest_storefront::routes::MemoryLocation;
use vital_harvest_storefront::store::MemoryStore;

/// A browsing session over shared, observable backends.
pub struct TestContext {
    /// Handle into the persisted store the state writes through.
    pub store: Rc<RefCell<MemoryStore>>,
    /// Handle into the location bar the router writes through.
    pub location: Rc<RefCell<MemoryLocation>>,
    /// The application state under test.
    pub state: AppState,
}

impl TestContext {
    /// Start a fresh session with empty backends.
    #[must_use]
    pub fn new() -> Self {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        let location = Rc::new(RefCell::new(MemoryLocation::new()));
        let state = AppState::with_backends(
            StorefrontConfig::defaults(),
            Box::new(Rc::clone(&store)),
            Box::new(Rc::clone(&location)),
        );

        Self {
            store,
            location,
            state,
        }
    }

    /// Simulate a page reload: a new session over the same persisted store.
    ///
    /// The cart and location are process state and start fresh; the identity
    /// registry and session come back from the store.
    pub fn reload(&mut self) {
        self.location = Rc::new(RefCell::new(MemoryLocation::new()));
        self.state = AppState::with_backends(
            StorefrontConfig::defaults(),
            Box::new(Rc::clone(&self.store)),
            Box::new(Rc::clone(&self.location)),
        );
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Billing details fixture.
#[must_use]
pub fn billing(name: &str) -> BillingDetails {
    BillingDetails {
        name: name.to_owned(),
        phone: "0300 1112223".to_owned(),
        address: "House 12, Street 4".to_owned(),
        city: "Lahore".to_owned(),
        notes: None,
    }
}

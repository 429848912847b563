//! Application state shared across the UI tree.
//!
//! [`AppState`] is the explicit context object a front end holds instead of
//! ambient globals: it owns the config, the session manager, the cart, the
//! router, and the pending order confirmation. Everything is single-threaded;
//! mutations run to completion inside one event handler.

use vital_harvest_core::ProductId;

use crate::cart::Cart;
use crate::catalog::{self, Product};
use crate::checkout::{BillingDetails, OrderConfirmation, OrderDraft};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::routes::{Location, MemoryLocation, Route, Router};
use crate::services::AuthService;
use crate::store::{JsonFileStore, KeyValueStore};

/// Application state: everything that changes while a visitor browses.
pub struct AppState {
    config: StorefrontConfig,
    auth: AuthService,
    cart: Cart,
    router: Router,
    last_order: Option<OrderConfirmation>,
}

impl AppState {
    /// Create application state with the default backends: a file-backed
    /// store under the configured data directory and an in-memory location.
    ///
    /// # Errors
    ///
    /// Returns an error if the store's directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let store = JsonFileStore::open(config.store_path())?;
        Ok(Self::with_backends(
            config,
            Box::new(store),
            Box::new(MemoryLocation::new()),
        ))
    }

    /// Create application state over injected store and location backends.
    #[must_use]
    pub fn with_backends(
        config: StorefrontConfig,
        store: Box<dyn KeyValueStore>,
        location: Box<dyn Location>,
    ) -> Self {
        Self {
            config,
            auth: AuthService::new(store),
            cart: Cart::new(),
            router: Router::new(location),
            last_order: None,
        }
    }

    /// The storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The session manager.
    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// The session manager, mutable.
    pub const fn auth_mut(&mut self) -> &mut AuthService {
        &mut self.auth
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart, mutable.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// The router.
    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// The router, mutable.
    pub const fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Navigate to a route.
    ///
    /// Leaving the checkout page drops any retained order confirmation.
    pub fn navigate(&mut self, route: Route) {
        self.router.navigate(route);
        self.drop_confirmation_if_away();
    }

    /// Reflect a location change the app did not initiate (back/forward).
    pub fn sync_location(&mut self, fragment: &str) -> Route {
        let route = self.router.handle_external_change(fragment);
        self.drop_confirmation_if_away();
        route
    }

    /// Look up a catalog product for the detail page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown ID; the front end
    /// renders this as a not-found page with a link back to the shop.
    pub fn product(&self, id: ProductId) -> Result<&'static Product> {
        catalog::find(id).ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// Compose an order draft from the current cart.
    ///
    /// The cart is untouched until the user actually dispatches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Checkout`] if the cart is empty.
    pub fn compose_order(&self, billing: BillingDetails) -> Result<OrderDraft> {
        Ok(OrderDraft::compose(billing, &self.cart, &self.config)?)
    }

    /// Record that the user dispatched an order (opened either deep link):
    /// clears the cart and retains the confirmation snapshot.
    pub fn dispatch_order(&mut self, draft: OrderDraft) -> &OrderConfirmation {
        self.cart.clear();
        self.last_order.insert(draft.into_confirmation())
    }

    /// The confirmation of the order dispatched on this checkout visit.
    #[must_use]
    pub fn last_order(&self) -> Option<&OrderConfirmation> {
        self.last_order.as_ref()
    }

    fn drop_confirmation_if_away(&mut self) {
        if self.router.current() != Route::Checkout {
            self.last_order = None;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutError;
    use crate::store::MemoryStore;

    fn state() -> AppState {
        AppState::with_backends(
            StorefrontConfig::defaults(),
            Box::new(MemoryStore::new()),
            Box::new(MemoryLocation::new()),
        )
    }

    fn billing() -> BillingDetails {
        BillingDetails {
            name: "Ali".to_owned(),
            phone: "0300 1112223".to_owned(),
            address: "House 12".to_owned(),
            city: "Lahore".to_owned(),
            notes: None,
        }
    }

    #[test]
    fn test_starts_at_home_anonymous_and_empty() {
        let state = state();
        assert_eq!(state.router().current(), Route::Home);
        assert!(!state.auth().is_authenticated());
        assert!(state.cart().is_empty());
        assert!(state.last_order().is_none());
    }

    #[test]
    fn test_product_lookup() {
        let state = state();
        assert!(state.product(ProductId::new(1)).is_ok());

        let missing = state.product(ProductId::new(999));
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_compose_order_leaves_cart_intact() {
        let mut state = state();
        let product = state.product(ProductId::new(1)).unwrap();
        state.cart_mut().add(product);

        let draft = state.compose_order(billing()).unwrap();
        assert_eq!(state.cart().item_count(), 1);
        assert_eq!(draft.total(), product.price);
    }

    #[test]
    fn test_dispatch_clears_cart_and_retains_confirmation() {
        let mut state = state();
        state.navigate(Route::Checkout);
        let product = state.product(ProductId::new(1)).unwrap();
        state.cart_mut().add(product);

        let draft = state.compose_order(billing()).unwrap();
        state.dispatch_order(draft);

        assert!(state.cart().is_empty());
        assert!(state.last_order().is_some());
    }

    #[test]
    fn test_confirmation_dropped_on_navigation_away() {
        let mut state = state();
        state.navigate(Route::Checkout);
        let product = state.product(ProductId::new(1)).unwrap();
        state.cart_mut().add(product);
        let draft = state.compose_order(billing()).unwrap();
        state.dispatch_order(draft);

        state.navigate(Route::Shop);
        assert!(state.last_order().is_none());
    }

    #[test]
    fn test_confirmation_dropped_on_external_navigation() {
        let mut state = state();
        state.navigate(Route::Checkout);
        let product = state.product(ProductId::new(1)).unwrap();
        state.cart_mut().add(product);
        let draft = state.compose_order(billing()).unwrap();
        state.dispatch_order(draft);

        state.sync_location("#/");
        assert!(state.last_order().is_none());
    }

    #[test]
    fn test_compose_order_with_empty_cart_fails() {
        let state = state();
        let result = state.compose_order(billing());
        assert!(matches!(
            result,
            Err(AppError::Checkout(CheckoutError::EmptyCart))
        ));
    }
}

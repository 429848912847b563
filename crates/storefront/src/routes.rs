//! Typed routes and the location-fragment dispatcher.
//!
//! The route is never stored as a string: it is a pure function of the
//! location fragment, parsed once into [`Route`] and matched exhaustively.
//! Unrecognized fragments map to [`Route::Home`] - that is the default case,
//! not an error.

use vital_harvest_core::ProductId;

/// A navigable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing page (also the fallback for unrecognized fragments).
    Home,
    /// Product listing.
    Shop,
    /// About page.
    About,
    /// Contact page.
    Contact,
    /// Checkout form.
    Checkout,
    /// Login / registration forms.
    Auth,
    /// Refund policy page.
    RefundPolicy,
    /// Privacy policy page.
    PrivacyPolicy,
    /// Terms of service page.
    Terms,
    /// Product detail page.
    Product(ProductId),
}

impl Route {
    /// Parse a location fragment.
    ///
    /// Total: any input yields a route, with everything unrecognized -
    /// unknown paths, malformed or non-positive product IDs - falling back
    /// to `Home`.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        let path = path.strip_prefix('/').unwrap_or(path);

        match path {
            "" => Self::Home,
            "shop" => Self::Shop,
            "about" => Self::About,
            "contact" => Self::Contact,
            "checkout" => Self::Checkout,
            "auth" => Self::Auth,
            "refund-policy" => Self::RefundPolicy,
            "privacy-policy" => Self::PrivacyPolicy,
            "terms" => Self::Terms,
            other => parse_product(other).unwrap_or(Self::Home),
        }
    }

    /// The canonical fragment for this route.
    #[must_use]
    pub fn fragment(&self) -> String {
        match self {
            Self::Home => "#/".to_owned(),
            Self::Shop => "#/shop".to_owned(),
            Self::About => "#/about".to_owned(),
            Self::Contact => "#/contact".to_owned(),
            Self::Checkout => "#/checkout".to_owned(),
            Self::Auth => "#/auth".to_owned(),
            Self::RefundPolicy => "#/refund-policy".to_owned(),
            Self::PrivacyPolicy => "#/privacy-policy".to_owned(),
            Self::Terms => "#/terms".to_owned(),
            Self::Product(id) => format!("#/product/{id}"),
        }
    }
}

/// Parse `product/<positive integer>`. Anything else is `None`.
fn parse_product(path: &str) -> Option<Route> {
    let id = path.strip_prefix("product/")?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id: i32 = id.parse().ok()?;
    (id > 0).then_some(Route::Product(ProductId::new(id)))
}

/// The location bar boundary.
///
/// A browser host would bridge this to `window.location.hash`; the terminal
/// shell and the tests use [`MemoryLocation`].
pub trait Location {
    /// The current fragment, including the leading `#`.
    fn fragment(&self) -> String;

    /// Replace the fragment.
    fn set_fragment(&mut self, fragment: &str);
}

/// In-memory location for front ends without a browser.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    fragment: String,
}

impl MemoryLocation {
    /// A location pointing at the home fragment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fragment: Route::Home.fragment(),
        }
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_owned();
    }
}

// A shared handle lets a test watch the fragment a router writes.
// Single-threaded by contract, so Rc/RefCell is enough.
impl Location for std::rc::Rc<std::cell::RefCell<MemoryLocation>> {
    fn fragment(&self) -> String {
        self.borrow().fragment()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.borrow_mut().set_fragment(fragment);
    }
}

/// Maps the location fragment to the current route and back.
///
/// Navigation is synchronous in both directions: [`Router::navigate`] writes
/// the fragment and updates state before returning, and an externally-changed
/// fragment (back/forward) is reflected by [`Router::handle_external_change`].
/// Either kind of change queues a scroll-to-top that the renderer drains with
/// [`Router::take_scroll_reset`].
pub struct Router {
    location: Box<dyn Location>,
    current: Route,
    scroll_reset: bool,
}

impl Router {
    /// Create a router over a location backend, dispatching its current
    /// fragment.
    #[must_use]
    pub fn new(location: Box<dyn Location>) -> Self {
        let current = Route::parse(&location.fragment());
        Self {
            location,
            current,
            scroll_reset: false,
        }
    }

    /// The current route.
    #[must_use]
    pub const fn current(&self) -> Route {
        self.current
    }

    /// Navigate to a route, writing its canonical fragment to the location.
    pub fn navigate(&mut self, route: Route) {
        self.location.set_fragment(&route.fragment());
        self.current = route;
        self.scroll_reset = true;
    }

    /// Reflect a location change the app did not initiate (back/forward).
    pub fn handle_external_change(&mut self, fragment: &str) -> Route {
        self.location.set_fragment(fragment);
        self.sync()
    }

    /// Re-dispatch whatever fragment the location currently holds.
    pub fn sync(&mut self) -> Route {
        self.current = Route::parse(&self.location.fragment());
        self.scroll_reset = true;
        self.current
    }

    /// Consume the pending scroll-to-top, if any.
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset)
    }
}

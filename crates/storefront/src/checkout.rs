//! Checkout message composer.
//!
//! The only "business logic" in the storefront: given billing details and
//! the current cart, render a deterministic plain-text order summary and
//! embed it, percent-encoded, into WhatsApp and `mailto:` deep links. The
//! user dispatches the message themselves; nothing is delivered from here.

use chrono::{DateTime, Utc};
use thiserror::Error;

use vital_harvest_core::Price;

use crate::cart::{Cart, LineItem};
use crate::config::StorefrontConfig;

/// Errors that can occur composing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no items to order.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
}

/// Billing details collected on the checkout form.
#[derive(Debug, Clone)]
pub struct BillingDetails {
    /// Customer name.
    pub name: String,
    /// Customer phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Free-form delivery notes.
    pub notes: Option<String>,
}

/// A composed order, ready for manual dispatch.
///
/// Holds the rendered summary and both deep links, plus the cart snapshot
/// that [`OrderConfirmation`] keeps after dispatch.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    billing: BillingDetails,
    items: Vec<LineItem>,
    total: Price,
    message: String,
    whatsapp_url: String,
    mailto_url: String,
}

impl OrderDraft {
    /// Compose an order from billing details and the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart is empty.
    pub fn compose(
        billing: BillingDetails,
        cart: &Cart,
        config: &StorefrontConfig,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let items = cart.items().to_vec();
        let total = cart.subtotal();
        let message = render_message(&billing, &items, total, config);

        let whatsapp_url = format!(
            "https://wa.me/{}?text={}",
            sanitize_phone(&config.order_phone),
            urlencoding::encode(&message),
        );

        let subject = format!("New Order from {}", billing.name);
        let mailto_url = format!(
            "mailto:{}?subject={}&body={}",
            config.order_email,
            urlencoding::encode(&subject),
            urlencoding::encode(&strip_emphasis(&message)),
        );

        Ok(Self {
            billing,
            items,
            total,
            message,
            whatsapp_url,
            mailto_url,
        })
    }

    /// The plain-text order summary (WhatsApp emphasis included).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The WhatsApp deep link.
    #[must_use]
    pub fn whatsapp_url(&self) -> &str {
        &self.whatsapp_url
    }

    /// The email deep link.
    #[must_use]
    pub fn mailto_url(&self) -> &str {
        &self.mailto_url
    }

    /// The order total.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// The ordered line items.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Turn the draft into the confirmation snapshot kept after dispatch.
    #[must_use]
    pub fn into_confirmation(self) -> OrderConfirmation {
        OrderConfirmation {
            items: self.items,
            total: self.total,
            billing: self.billing,
            placed_at: Utc::now(),
        }
    }
}

/// Snapshot shown on the confirmation view after the user dispatches an
/// order. Retained in page state until navigation leaves the checkout page.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    /// The ordered line items.
    pub items: Vec<LineItem>,
    /// The order total.
    pub total: Price,
    /// The billing details the order was placed with.
    pub billing: BillingDetails,
    /// When the order was dispatched.
    pub placed_at: DateTime<Utc>,
}

/// Render the deterministic order summary.
///
/// One line per cart item (`name (xqty) - line total`) and a trailing total
/// line. The heading carries WhatsApp `*` emphasis; item and total lines
/// stay plain so the text reads the same everywhere.
fn render_message(
    billing: &BillingDetails,
    items: &[LineItem],
    total: Price,
    config: &StorefrontConfig,
) -> String {
    let mut lines = vec![
        format!("*New Order - {}*", config.store_name),
        String::new(),
        format!("Name: {}", billing.name),
        format!("Phone: {}", billing.phone),
        format!("Address: {}, {}", billing.address, billing.city),
    ];

    if let Some(notes) = billing.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("Notes: {notes}"));
    }

    lines.push(String::new());
    for item in items {
        lines.push(format!(
            "{} (x{}) - {}",
            item.product.name,
            item.quantity,
            item.line_total().display(),
        ));
    }

    lines.push(String::new());
    lines.push(format!("Total: {}", total.display()));

    lines.join("\n")
}

/// Keep only digits and `+`, the characters `wa.me` accepts.
fn sanitize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Drop markdown emphasis characters for the email body.
fn strip_emphasis(message: &str) -> String {
    message.replace(['*', '_'], "")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vital_harvest_core::ProductId;

    use super::*;
    use crate::catalog::Product;

    fn product(name: &str, rupees: i64) -> Product {
        Product {
            id: ProductId::new(1),
            name: name.to_owned(),
            category: "Test".to_owned(),
            price: Price::rupees(rupees),
            original_price: None,
            rating: 5.0,
            image_url: String::new(),
            image_urls: Vec::new(),
            benefits: Vec::new(),
            description: String::new(),
        }
    }

    fn billing(name: &str) -> BillingDetails {
        BillingDetails {
            name: name.to_owned(),
            phone: "0300 1112223".to_owned(),
            address: "House 12, Street 4".to_owned(),
            city: "Lahore".to_owned(),
            notes: None,
        }
    }

    fn draft_for(name: &str, rupees: i64) -> OrderDraft {
        let mut cart = Cart::new();
        cart.add(&product(name, rupees));
        OrderDraft::compose(billing("Ali"), &cart, &StorefrontConfig::defaults()).unwrap()
    }

    #[test]
    fn test_empty_cart_rejected() {
        let result = OrderDraft::compose(
            billing("Ali"),
            &Cart::new(),
            &StorefrontConfig::defaults(),
        );
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn test_message_item_and_total_lines() {
        let draft = draft_for("Shilajit", 1500);

        let lines: Vec<&str> = draft.message().lines().collect();
        assert!(lines.contains(&"Shilajit (x1) - Rs 1500"));
        assert_eq!(lines.last(), Some(&"Total: Rs 1500"));
    }

    #[test]
    fn test_message_customer_fields() {
        let draft = draft_for("Shilajit", 1500);
        assert!(draft.message().contains("Name: Ali"));
        assert!(draft.message().contains("Phone: 0300 1112223"));
        assert!(draft.message().contains("Address: House 12, Street 4, Lahore"));
        assert!(!draft.message().contains("Notes:"));
    }

    #[test]
    fn test_notes_included_when_present() {
        let mut cart = Cart::new();
        cart.add(&product("Shilajit", 1500));
        let mut details = billing("Ali");
        details.notes = Some("Call before delivery".to_owned());

        let draft =
            OrderDraft::compose(details, &cart, &StorefrontConfig::defaults()).unwrap();
        assert!(draft.message().contains("Notes: Call before delivery"));
    }

    #[test]
    fn test_multiple_items_each_get_a_line() {
        let mut cart = Cart::new();
        let shilajit = product("Shilajit", 500);
        cart.add(&shilajit);
        cart.add(&shilajit);
        let mut honey = product("Sidr Honey", 1200);
        honey.id = ProductId::new(2);
        cart.add(&honey);

        let draft =
            OrderDraft::compose(billing("Ali"), &cart, &StorefrontConfig::defaults()).unwrap();
        assert!(draft.message().contains("Shilajit (x2) - Rs 1000"));
        assert!(draft.message().contains("Sidr Honey (x1) - Rs 1200"));
        assert!(draft.message().ends_with("Total: Rs 2200"));
    }

    #[test]
    fn test_whatsapp_link_phone_is_digits_and_plus() {
        let draft = draft_for("Shilajit", 1500);
        assert!(
            draft
                .whatsapp_url()
                .starts_with("https://wa.me/+923001234567?text=")
        );
    }

    #[test]
    fn test_whatsapp_link_roundtrips_message() {
        let draft = draft_for("Shilajit", 1500);

        let parsed = url::Url::parse(draft.whatsapp_url()).unwrap();
        let (_, text) = parsed
            .query_pairs()
            .find(|(k, _)| k == "text")
            .unwrap();
        assert_eq!(text, draft.message());
    }

    #[test]
    fn test_mailto_link_shape() {
        let draft = draft_for("Shilajit", 1500);
        assert!(
            draft
                .mailto_url()
                .starts_with("mailto:orders@vitalharvest.pk?subject=")
        );
        assert!(draft.mailto_url().contains("New%20Order%20from%20Ali"));
    }

    #[test]
    fn test_mailto_body_strips_emphasis() {
        let draft = draft_for("Shilajit", 1500);

        let parsed = url::Url::parse(draft.mailto_url()).unwrap();
        let (_, body) = parsed
            .query_pairs()
            .find(|(k, _)| k == "body")
            .unwrap();
        assert!(!body.contains('*'));
        assert!(body.contains("New Order - Vital Harvest"));
        assert!(body.contains("Total: Rs 1500"));
    }

    #[test]
    fn test_into_confirmation_keeps_snapshot() {
        let draft = draft_for("Shilajit", 1500);
        let total = draft.total();

        let confirmation = draft.into_confirmation();
        assert_eq!(confirmation.total, total);
        assert_eq!(confirmation.items.len(), 1);
        assert_eq!(confirmation.billing.name, "Ali");
    }

    #[test]
    fn test_sanitize_phone() {
        assert_eq!(sanitize_phone("+92 (300) 111-2223"), "+923001112223");
    }
}

//! In-memory cart.
//!
//! One ordered line item per product; quantities are always strictly
//! positive. Derived values (`item_count`, `subtotal`) are recomputed on
//! every read. The cart is process-local and deliberately not persisted.

use vital_harvest_core::{CurrencyCode, Price, ProductId};

use crate::catalog::Product;

/// One product's entry in the cart.
///
/// Carries a full product snapshot so the line renders and totals without
/// going back to the catalog.
#[derive(Debug, Clone)]
pub struct LineItem {
    /// Snapshot of the product when it was added.
    pub product: Product,
    /// Units of this product; always >= 1 while the line exists.
    pub quantity: u32,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line's quantity, or appends a new line with
    /// quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(LineItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Remove a product's line entirely. No-op if absent.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Set a line's quantity exactly.
    ///
    /// Quantity 0 removes the line, same as [`Cart::remove`]. No-op if the
    /// product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The line items, in the order products were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or(CurrencyCode::default(), |i| i.product.price.currency_code());

        self.items
            .iter()
            .fold(Price::zero(currency), |acc, i| acc + i.line_total())
    }
}

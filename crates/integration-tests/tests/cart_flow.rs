//! Cart mutations and derived totals against the real catalog.

#![allow(clippy::unwrap_used)]

use vital_harvest_core::{Price, ProductId};
use vital_harvest_integration_tests::TestContext;

#[test]
fn add_sequence_totals_match_per_product_counts() {
    let mut ctx = TestContext::new();

    // add(1) x2, add(3) x1: one line per distinct product.
    let shilajit = ctx.state.product(ProductId::new(1)).unwrap();
    let capsules = ctx.state.product(ProductId::new(3)).unwrap();
    ctx.state.cart_mut().add(shilajit);
    ctx.state.cart_mut().add(capsules);
    ctx.state.cart_mut().add(shilajit);

    assert_eq!(ctx.state.cart().items().len(), 2);
    assert_eq!(ctx.state.cart().item_count(), 3);

    let expected = shilajit.price.times(2) + capsules.price.times(1);
    assert_eq!(ctx.state.cart().subtotal(), expected);
}

#[test]
fn known_catalog_prices_produce_known_totals() {
    let mut ctx = TestContext::new();

    // Himalayan Shilajit Resin is Rs 1500, capsules Rs 1200.
    let shilajit = ctx.state.product(ProductId::new(1)).unwrap();
    let capsules = ctx.state.product(ProductId::new(3)).unwrap();
    ctx.state.cart_mut().add(shilajit);
    ctx.state.cart_mut().add(shilajit);
    ctx.state.cart_mut().add(capsules);

    assert_eq!(ctx.state.cart().subtotal(), Price::rupees(4200));
}

#[test]
fn set_quantity_zero_is_equivalent_to_remove() {
    let mut removed = TestContext::new();
    let mut zeroed = TestContext::new();

    for ctx in [&mut removed, &mut zeroed] {
        let product = ctx.state.product(ProductId::new(1)).unwrap();
        ctx.state.cart_mut().add(product);
        let other = ctx.state.product(ProductId::new(4)).unwrap();
        ctx.state.cart_mut().add(other);
    }

    removed.state.cart_mut().remove(ProductId::new(1));
    zeroed.state.cart_mut().set_quantity(ProductId::new(1), 0);

    assert_eq!(
        removed.state.cart().item_count(),
        zeroed.state.cart().item_count()
    );
    assert_eq!(
        removed.state.cart().subtotal(),
        zeroed.state.cart().subtotal()
    );
    // As if product 1 was never added.
    let other = removed.state.product(ProductId::new(4)).unwrap();
    assert_eq!(removed.state.cart().subtotal(), other.price);
}

#[test]
fn set_quantity_overwrites_instead_of_incrementing() {
    let mut ctx = TestContext::new();

    let product = ctx.state.product(ProductId::new(1)).unwrap();
    ctx.state.cart_mut().add(product);
    ctx.state.cart_mut().set_quantity(ProductId::new(1), 4);
    ctx.state.cart_mut().set_quantity(ProductId::new(1), 4);

    assert_eq!(ctx.state.cart().item_count(), 4);
}

#[test]
fn cart_does_not_survive_a_reload() {
    let mut ctx = TestContext::new();

    let product = ctx.state.product(ProductId::new(1)).unwrap();
    ctx.state.cart_mut().add(product);
    assert_eq!(ctx.state.cart().item_count(), 1);

    ctx.reload();
    assert!(ctx.state.cart().is_empty());
}

//! Static product catalog.
//!
//! Reference data compiled into the binary - nothing here is fetched or
//! mutated. The cart takes snapshots of these products; the shop and product
//! pages read them directly.

use std::sync::LazyLock;

use vital_harvest_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Catalog-wide unique ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label shown on the shop page.
    pub category: String,
    /// Current unit price.
    pub price: Price,
    /// Pre-discount price, when the product is on sale.
    pub original_price: Option<Price>,
    /// Average customer rating, 0.0 to 5.0.
    pub rating: f32,
    /// Primary image.
    pub image_url: String,
    /// Detail-page gallery, primary image first.
    pub image_urls: Vec<String>,
    /// Benefit bullet points for the detail page.
    pub benefits: Vec<String>,
    /// Long-form description.
    pub description: String,
}

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(seed);

/// All products, in catalog order.
#[must_use]
pub fn all() -> &'static [Product] {
    &CATALOG
}

/// Look up a product by ID.
#[must_use]
pub fn find(id: ProductId) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Products in the given category, in catalog order.
#[must_use]
pub fn by_category(category: &str) -> Vec<&'static Product> {
    CATALOG.iter().filter(|p| p.category == category).collect()
}

/// Distinct category labels, in first-appearance order.
#[must_use]
pub fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for product in CATALOG.iter() {
        if !seen.contains(&product.category.as_str()) {
            seen.push(product.category.as_str());
        }
    }
    seen
}

#[allow(clippy::too_many_lines)]
fn seed() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Himalayan Shilajit Resin".to_owned(),
            category: "Shilajit".to_owned(),
            price: Price::rupees(1500),
            original_price: Some(Price::rupees(1800)),
            rating: 4.8,
            image_url: "/static/products/shilajit-resin.jpg".to_owned(),
            image_urls: vec![
                "/static/products/shilajit-resin.jpg".to_owned(),
                "/static/products/shilajit-resin-jar.jpg".to_owned(),
                "/static/products/shilajit-resin-spoon.jpg".to_owned(),
            ],
            benefits: vec![
                "Rich in fulvic acid and trace minerals".to_owned(),
                "Supports energy and stamina".to_owned(),
                "Sun-dried at source, lab tested for purity".to_owned(),
            ],
            description: "Pure resin harvested above 16,000 feet in the Gilgit \
                          ranges, purified with spring water and nothing else. \
                          A rice-grain sized portion dissolved in warm milk or \
                          water is the traditional daily serving."
                .to_owned(),
        },
        Product {
            id: ProductId::new(2),
            name: "Gold Grade Shilajit Resin".to_owned(),
            category: "Shilajit".to_owned(),
            price: Price::rupees(2500),
            original_price: None,
            rating: 4.9,
            image_url: "/static/products/shilajit-gold.jpg".to_owned(),
            image_urls: vec![
                "/static/products/shilajit-gold.jpg".to_owned(),
                "/static/products/shilajit-gold-detail.jpg".to_owned(),
            ],
            benefits: vec![
                "Highest altitude single-origin batch".to_owned(),
                "Soft, fast-dissolving texture".to_owned(),
                "Third-party tested for heavy metals".to_owned(),
            ],
            description: "Our limited gold grade comes from a single summer \
                          collection and is purified twice for a noticeably \
                          smoother taste."
                .to_owned(),
        },
        Product {
            id: ProductId::new(3),
            name: "Shilajit Capsules (60 count)".to_owned(),
            category: "Shilajit".to_owned(),
            price: Price::rupees(1200),
            original_price: Some(Price::rupees(1400)),
            rating: 4.6,
            image_url: "/static/products/shilajit-capsules.jpg".to_owned(),
            image_urls: vec!["/static/products/shilajit-capsules.jpg".to_owned()],
            benefits: vec![
                "Travel-friendly 500mg capsules".to_owned(),
                "No taste, no mess".to_owned(),
                "Same resin as our jars, freeze-dried".to_owned(),
            ],
            description: "The full resin experience without the spoon: each \
                          vegetarian capsule carries 500mg of freeze-dried \
                          Himalayan shilajit."
                .to_owned(),
        },
        Product {
            id: ProductId::new(4),
            name: "Sidr Honey 500g".to_owned(),
            category: "Honey".to_owned(),
            price: Price::rupees(1800),
            original_price: Some(Price::rupees(2000)),
            rating: 4.7,
            image_url: "/static/products/sidr-honey.jpg".to_owned(),
            image_urls: vec![
                "/static/products/sidr-honey.jpg".to_owned(),
                "/static/products/sidr-honey-comb.jpg".to_owned(),
            ],
            benefits: vec![
                "Single-flower sidr harvest".to_owned(),
                "Raw and unheated".to_owned(),
                "Thick amber texture with caramel notes".to_owned(),
            ],
            description: "Harvested once a year from beri orchards in the \
                          Karak valley, bottled raw straight from the comb."
                .to_owned(),
        },
        Product {
            id: ProductId::new(5),
            name: "Wild Forest Honey 1kg".to_owned(),
            category: "Honey".to_owned(),
            price: Price::rupees(2200),
            original_price: None,
            rating: 4.5,
            image_url: "/static/products/forest-honey.jpg".to_owned(),
            image_urls: vec!["/static/products/forest-honey.jpg".to_owned()],
            benefits: vec![
                "Multi-flora mountain forage".to_owned(),
                "Coarse-filtered, pollen left in".to_owned(),
                "Family-size 1kg jar".to_owned(),
            ],
            description: "A darker, maltier honey gathered from wild hives in \
                          the Swat forests. Crystallizes naturally in winter."
                .to_owned(),
        },
        Product {
            id: ProductId::new(6),
            name: "Roasted Makhana 250g".to_owned(),
            category: "Superfoods".to_owned(),
            price: Price::rupees(850),
            original_price: None,
            rating: 4.4,
            image_url: "/static/products/makhana.jpg".to_owned(),
            image_urls: vec!["/static/products/makhana.jpg".to_owned()],
            benefits: vec![
                "Light, protein-rich snack".to_owned(),
                "Dry-roasted with pink salt".to_owned(),
                "No oil, no preservatives".to_owned(),
            ],
            description: "Fox nuts dry-roasted in small batches and finished \
                          with Himalayan pink salt."
                .to_owned(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = all().iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_find_known_product() {
        let product = find(ProductId::new(1)).unwrap();
        assert_eq!(product.name, "Himalayan Shilajit Resin");
        assert_eq!(product.price, Price::rupees(1500));
    }

    #[test]
    fn test_find_unknown_product() {
        assert!(find(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_categories_are_distinct_and_ordered() {
        assert_eq!(categories(), vec!["Shilajit", "Honey", "Superfoods"]);
    }

    #[test]
    fn test_by_category_filters() {
        let honey = by_category("Honey");
        assert_eq!(honey.len(), 2);
        assert!(honey.iter().all(|p| p.category == "Honey"));
        assert!(by_category("Nonexistent").is_empty());
    }

    #[test]
    fn test_sane_reference_data() {
        for product in all() {
            assert!(product.price.amount() > rust_decimal::Decimal::ZERO);
            assert!((0.0..=5.0).contains(&product.rating));
            assert_eq!(product.image_urls.first(), Some(&product.image_url));
            if let Some(original) = product.original_price {
                assert!(original.amount() > product.price.amount());
            }
        }
    }
}

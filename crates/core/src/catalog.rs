//! The fixed product catalog.
//!
//! The catalog is built once at start-up and never mutated. Lookups borrow
//! from it; callers that need to hold products past a request clone them.

use crate::types::{Price, Product};

/// The set of products available in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo store's fixed product list.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            Product::new(
                "p1",
                "Classic Leather Wallet",
                Price::usd_cents(4500),
                "/static/img/p1.svg",
            ),
            Product::new(
                "p2",
                "Ceramic Pour-Over Set",
                Price::usd_cents(3250),
                "/static/img/p2.svg",
            ),
            Product::new(
                "p3",
                "Wool Throw Blanket",
                Price::usd_cents(6000),
                "/static/img/p3.svg",
            ),
            Product::new(
                "p4",
                "Enamel Camp Mug",
                Price::usd_cents(1800),
                "/static/img/p4.svg",
            ),
            Product::new(
                "p5",
                "Linen Apron",
                Price::usd_cents(2799),
                "/static/img/p5.svg",
            ),
            Product::new(
                "p6",
                "Brass Desk Lamp",
                Price::usd_cents(8900),
                "/static/img/p6.svg",
            ),
        ])
    }

    /// All products, in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Look up a product by exact display name.
    ///
    /// Matching is case- and whitespace-sensitive.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Whether a product with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_demo_catalog_ids_and_names_are_unique() {
        let catalog = Catalog::demo();
        let ids: HashSet<_> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        let names: HashSet<_> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_demo_catalog_prices_are_non_negative() {
        for product in Catalog::demo().products() {
            assert!(!product.price.amount.is_sign_negative(), "{}", product.id);
        }
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::demo();
        assert_eq!(
            catalog.find("p3").map(|p| p.name.as_str()),
            Some("Wool Throw Blanket")
        );
        assert!(catalog.find("p99").is_none());
        assert!(catalog.contains("p1"));
    }

    #[test]
    fn test_find_by_name_requires_exact_match() {
        let catalog = Catalog::demo();
        assert_eq!(
            catalog.find_by_name("Linen Apron").map(|p| p.id.as_str()),
            Some("p5")
        );
        assert!(catalog.find_by_name("linen apron").is_none());
        assert!(catalog.find_by_name(" Linen Apron").is_none());
    }
}

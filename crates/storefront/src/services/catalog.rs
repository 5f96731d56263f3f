//! Catalog service.

use mockshop_core::{Catalog, Product};
use tracing::instrument;

use super::Latency;

/// Read access to the product catalog.
pub struct CatalogService<'a> {
    catalog: &'a Catalog,
    latency: Latency,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(catalog: &'a Catalog, latency: Latency) -> Self {
        Self { catalog, latency }
    }

    /// All products, after a simulated fetch delay.
    ///
    /// Returns an owned copy; nothing the caller does to it reaches the
    /// catalog.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Vec<Product> {
        self.latency.simulate().await;
        self.catalog.products().to_vec()
    }

    /// Look up a product by exact display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&'a Product> {
        self.catalog.find_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_products_returns_full_catalog() {
        let catalog = Catalog::demo();
        let products = CatalogService::new(&catalog, Latency::none())
            .list_products()
            .await;
        assert_eq!(products.len(), catalog.len());
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("p1"));
    }

    #[tokio::test]
    async fn test_list_products_returns_independent_copy() {
        let catalog = Catalog::demo();
        let service = CatalogService::new(&catalog, Latency::none());

        let mut products = service.list_products().await;
        products[0].name = "Renamed".to_string();
        products.clear();

        let again = service.list_products().await;
        assert_eq!(again.len(), catalog.len());
        assert_eq!(again[0].name, "Classic Leather Wallet");
    }
}

//! Cart service.
//!
//! The cart is stored as a single JSON object under [`keys::CART`]. Every
//! mutation is one read-modify-write of that whole object: two overlapping
//! requests from the same visitor each read the cart independently, and the
//! later write wins.

use chrono::{DateTime, Utc};
use mockshop_core::{
    Catalog, CartItems, OrderConfirmation, OrderDetails, OrderId, PricedCart, ProductId,
    ShopError, price_cart,
};
use rand::Rng;
use tracing::instrument;

use super::{Latency, ServiceError};
use crate::storage::{KeyValueStore, keys, read_json, write_json};

/// Cart operations against one visitor's storage.
pub struct CartService<'a, S> {
    store: &'a S,
    catalog: &'a Catalog,
    latency: Latency,
}

impl<'a, S: KeyValueStore> CartService<'a, S> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a S, catalog: &'a Catalog, latency: Latency) -> Self {
        Self {
            store,
            catalog,
            latency,
        }
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if the product is not in the catalog.
    /// Returns `ServiceError::Storage` if the store fails.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> Result<CartItems, ServiceError> {
        self.latency.simulate().await;

        if !self.catalog.contains(product_id) {
            return Err(ShopError::NotFound(ProductId::new(product_id)).into());
        }

        let mut items = self.load().await?;
        items.add(ProductId::new(product_id), quantity);
        self.save(&items).await?;

        tracing::debug!(product_id, quantity, "Added item to cart");
        Ok(items)
    }

    /// Set the quantity for a product exactly; zero or below removes it.
    ///
    /// The ID is not checked against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the store fails.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> Result<CartItems, ServiceError> {
        self.latency.simulate().await;

        let mut items = self.load().await?;
        items.set(ProductId::new(product_id), quantity);
        self.save(&items).await?;
        Ok(items)
    }

    /// Remove a product from the cart. Removing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the store fails.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, product_id: &str) -> Result<CartItems, ServiceError> {
        self.latency.simulate().await;

        let mut items = self.load().await?;
        items.remove(product_id);
        self.save(&items).await?;
        Ok(items)
    }

    /// Read the cart with every line priced. Never writes.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the store fails.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<PricedCart, ServiceError> {
        self.latency.simulate().await;

        let items = self.load().await?;
        Ok(price_cart(&items, self.catalog))
    }

    /// Total units in the cart, for the header badge.
    ///
    /// Skips the simulated delay so page renders stay quick.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the store fails.
    pub async fn item_count(&self) -> Result<u64, ServiceError> {
        Ok(self.load().await?.item_count())
    }

    /// Place an order and empty the cart.
    ///
    /// `details` are expected to have been presence-checked by the caller.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::EmptyCart` (leaving storage untouched) if the cart
    /// has no entries.
    /// Returns `ServiceError::Storage` if the store fails.
    #[instrument(skip(self, details), fields(customer = %details.name))]
    pub async fn checkout(
        &self,
        details: &OrderDetails,
    ) -> Result<OrderConfirmation, ServiceError> {
        self.latency.simulate().await;

        let items = self.load().await?;
        if items.is_empty() {
            return Err(ShopError::EmptyCart.into());
        }

        let cart = price_cart(&items, self.catalog);
        let placed_at = Utc::now();
        let order_id = generate_order_id(placed_at);

        self.store.remove(keys::CART).await?;

        tracing::info!(
            order_id = %order_id,
            total = %cart.summary.total,
            items = cart.summary.item_count,
            "Order placed"
        );

        Ok(OrderConfirmation {
            order_id,
            customer_name: details.name.trim().to_string(),
            cart,
            placed_at,
        })
    }

    async fn load(&self) -> Result<CartItems, ServiceError> {
        Ok(read_json(self.store, keys::CART)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, items: &CartItems) -> Result<(), ServiceError> {
        write_json(self.store, keys::CART, items).await?;
        Ok(())
    }
}

/// Time-based order ID with a short random suffix, e.g.
/// `ORD-1760601600000-3F2A`.
fn generate_order_id(placed_at: DateTime<Utc>) -> OrderId {
    let suffix: u16 = rand::rng().random();
    OrderId::new(format!("ORD-{}-{suffix:04X}", placed_at.timestamp_millis()))
}

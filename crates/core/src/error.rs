//! Domain failures.

use thiserror::Error;

use crate::types::ProductId;

/// Failures a shopper can trigger through normal use of the store.
///
/// Neither is fatal: the storefront reports them and the page stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// The product ID does not exist in the catalog.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,
}

//! Offline cart quotes.
//!
//! Builds a cart in an in-memory store through the same cart service the
//! storefront uses, then prints the priced result.

use std::fmt::{self, Write};

use mockshop_core::PricedCart;
use mockshop_storefront::config::StorefrontConfig;
use mockshop_storefront::services::{Latency, ServiceError};
use mockshop_storefront::state::AppState;
use mockshop_storefront::storage::MemoryStore;
use thiserror::Error;

/// Errors that can occur while quoting.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// An argument is not `product_id=quantity`.
    #[error("Invalid item '{0}': expected product_id=quantity")]
    InvalidItem(String),

    /// The cart service rejected an item.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// A priced cart ready for printing.
#[derive(Debug)]
pub struct Quote(pub PricedCart);

/// Parse `product_id=quantity` (or a bare `product_id`).
fn parse_item(raw: &str) -> Result<(&str, i64), QuoteError> {
    let invalid = || QuoteError::InvalidItem(raw.to_string());

    let (id, quantity) = match raw.split_once('=') {
        Some((id, quantity)) => (id.trim(), quantity.trim().parse().map_err(|_| invalid())?),
        None => (raw.trim(), 1),
    };

    if id.is_empty() {
        return Err(invalid());
    }
    Ok((id, quantity))
}

/// Price the given items.
///
/// # Errors
///
/// Returns `QuoteError::InvalidItem` for malformed arguments and
/// `QuoteError::Service` (e.g. `NotFound`) for unknown products.
pub async fn quote(items: &[String]) -> Result<Quote, QuoteError> {
    let state = AppState::new(StorefrontConfig {
        latency: Latency::none(),
        ..StorefrontConfig::default()
    });
    let store = MemoryStore::new();
    let cart = state.cart_service(&store);

    for raw in items {
        let (id, quantity) = parse_item(raw)?;
        cart.add_item(id, quantity).await?;
        tracing::debug!(id, quantity, "Added to quote");
    }

    Ok(Quote(cart.get_cart().await?))
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cart = &self.0;
        if cart.is_empty() {
            return writeln!(f, "(empty cart)");
        }

        let mut out = String::new();
        for line in &cart.lines {
            writeln!(
                out,
                "{:>3} x {:<28} {:>9} {:>10}",
                line.quantity,
                line.name,
                line.unit_price.to_string(),
                line.line_total.to_string()
            )?;
        }

        let summary = &cart.summary;
        for (label, amount) in [
            ("Subtotal", summary.subtotal),
            ("Shipping", summary.shipping),
            ("Tax", summary.tax),
            ("Total", summary.total),
        ] {
            writeln!(out, "{label:>44} {:>10}", amount.to_string())?;
        }

        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use mockshop_core::ShopError;

    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("p1=2").unwrap(), ("p1", 2));
        assert_eq!(parse_item(" p3 = 1 ").unwrap(), ("p3", 1));
        assert_eq!(parse_item("p4").unwrap(), ("p4", 1));
        assert!(matches!(parse_item("p1=two"), Err(QuoteError::InvalidItem(_))));
        assert!(matches!(parse_item("=2"), Err(QuoteError::InvalidItem(_))));
    }

    #[tokio::test]
    async fn test_quote_worked_example() {
        let quote = quote(&["p1=2".to_string(), "p3=1".to_string()])
            .await
            .unwrap();

        let out = quote.to_string();
        assert!(out.contains("Classic Leather Wallet"));
        assert!(out.contains("$150.00"));
        assert!(out.contains("$5.00"));
        assert!(out.contains("$10.50"));
        assert!(out.lines().last().unwrap().ends_with("$165.50"));
    }

    #[tokio::test]
    async fn test_quote_unknown_product() {
        let err = quote(&["p99=1".to_string()]).await.unwrap_err();
        assert!(matches!(
            err,
            QuoteError::Service(ServiceError::Shop(ShopError::NotFound(_)))
        ));
        assert_eq!(err.to_string(), "Product not found: p99");
    }
}

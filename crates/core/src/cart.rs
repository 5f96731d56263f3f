//! Cart quantities and pricing.
//!
//! A cart is nothing more than a mapping from product ID to a positive
//! quantity. Everything shown to the shopper (line items, subtotal, shipping,
//! tax, total) is derived from that mapping and the catalog on every read and
//! never stored.
//!
//! # Pricing
//!
//! - line total = unit price × quantity, rounded to cents
//! - subtotal = sum of line totals, rounded to cents
//! - shipping = [`SHIPPING_FEE`] when the cart has any lines, otherwise zero
//! - tax = [`TAX_RATE`] × subtotal, rounded to cents
//! - total = subtotal + shipping + tax, rounded to cents
//!
//! Each figure is rounded on its own; no guarantee is made about rounding
//! compounding across figures.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::{Price, ProductId, round_money};

/// Flat shipping fee applied to any non-empty cart (5.00).
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Sales tax rate applied to the subtotal (7%).
pub const TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// Stored cart contents: product ID to quantity.
///
/// Quantities are always positive. Any operation that would leave an entry at
/// zero or below removes it instead, and zero entries found in stored data are
/// dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ProductId, u32>")]
pub struct CartItems(BTreeMap<ProductId, u32>);

impl From<BTreeMap<ProductId, u32>> for CartItems {
    fn from(mut items: BTreeMap<ProductId, u32>) -> Self {
        items.retain(|_, quantity| *quantity > 0);
        Self(items)
    }
}

impl CartItems {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` to the entry for `id`, creating it if absent.
    ///
    /// A negative `quantity` decrements; the entry is removed if the result is
    /// not positive. Quantities saturate at `u32::MAX`.
    pub fn add(&mut self, id: ProductId, quantity: i64) {
        let current = i64::from(self.quantity(id.as_str()));
        self.set(id, current.saturating_add(quantity));
    }

    /// Set the entry for `id` to exactly `quantity`.
    ///
    /// A `quantity` of zero or below removes the entry.
    pub fn set(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.0.remove(id.as_str());
        } else {
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.0.insert(id, quantity);
        }
    }

    /// Remove the entry for `id`. Returns whether an entry was present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id).is_some()
    }

    /// Quantity stored for `id`; zero when absent.
    #[must_use]
    pub fn quantity(&self, id: &str) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.0.values().map(|&q| u64::from(q)).sum()
    }

    /// Iterate over entries in product ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.0.iter().map(|(id, &q)| (id, q))
    }
}

/// A cart entry joined with catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub product_id: ProductId,
    /// Product name, or the raw ID when the product is not in the catalog.
    pub name: String,
    /// Image reference; empty for products missing from the catalog.
    pub image: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
    /// False when the stored ID no longer resolves against the catalog.
    pub in_catalog: bool,
}

/// Cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
    /// Total units across all lines.
    pub item_count: u64,
}

impl CartSummary {
    /// Summary of an empty cart: everything zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            subtotal: Price::zero(),
            shipping: Price::zero(),
            tax: Price::zero(),
            total: Price::zero(),
            item_count: 0,
        }
    }
}

/// A cart with every line priced and the totals computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedCart {
    pub lines: Vec<LineItem>,
    pub summary: CartSummary,
}

impl PricedCart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Price a cart against the catalog.
///
/// IDs that are not in the catalog still produce a line: zero unit price, the
/// raw ID as the name, and `in_catalog` set to false.
#[must_use]
pub fn price_cart(items: &CartItems, catalog: &Catalog) -> PricedCart {
    let lines: Vec<LineItem> = items
        .iter()
        .map(|(id, quantity)| price_line(id, quantity, catalog))
        .collect();

    let subtotal = round_money(lines.iter().map(|line| line.line_total.amount).sum());
    let shipping = if lines.is_empty() {
        Decimal::ZERO
    } else {
        SHIPPING_FEE
    };
    let tax = round_money(subtotal * TAX_RATE);
    let total = round_money(subtotal + shipping + tax);

    PricedCart {
        summary: CartSummary {
            subtotal: Price::new(subtotal),
            shipping: Price::new(shipping),
            tax: Price::new(tax),
            total: Price::new(total),
            item_count: items.item_count(),
        },
        lines,
    }
}

fn price_line(id: &ProductId, quantity: u32, catalog: &Catalog) -> LineItem {
    match catalog.find(id.as_str()) {
        Some(product) => LineItem {
            product_id: id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity,
            line_total: Price::new(round_money(
                product.price.amount * Decimal::from(quantity),
            )),
            in_catalog: true,
        },
        None => LineItem {
            product_id: id.clone(),
            name: id.to_string(),
            image: String::new(),
            unit_price: Price::zero(),
            quantity,
            line_total: Price::zero(),
            in_catalog: false,
        },
    }
}

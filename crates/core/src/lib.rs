//! Mockshop Core - Shared types and pricing logic.
//!
//! This crate provides the domain types used across all Mockshop components:
//! - `storefront` - The demo storefront web application
//! - `cli` - Command-line tools for browsing the catalog and quoting carts
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no timers. Everything that touches the visitor's storage or
//! simulates network latency lives in the storefront's service layer.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product/order IDs and prices
//! - [`catalog`] - The fixed product catalog
//! - [`cart`] - Cart quantities and the pricing computation
//! - [`order`] - Checkout input and confirmation types
//! - [`error`] - Domain failures surfaced to shoppers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod order;
pub mod types;

pub use cart::{CartItems, CartSummary, LineItem, PricedCart, SHIPPING_FEE, TAX_RATE, price_cart};
pub use catalog::Catalog;
pub use error::ShopError;
pub use order::{OrderConfirmation, OrderDetails};
pub use types::*;

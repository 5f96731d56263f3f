//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Product listing
//! - `cart` - Cart mutations, pricing and checkout
//! - `session` - Fake login/logout
//!
//! Services borrow a [`KeyValueStore`](crate::storage::KeyValueStore) for the
//! duration of one call and are built per request, the same way for the
//! session-backed store and the in-memory one. Every operation waits out a
//! simulated network delay before touching storage.

pub mod cart;
pub mod catalog;
pub mod session;

use std::time::Duration;

use mockshop_core::ShopError;
use rand::Rng;
use thiserror::Error;

use crate::storage::StorageError;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use session::SessionService;

/// Errors returned by storefront services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A shopper-facing domain failure (unknown product, empty cart).
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// The visitor's storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Login was attempted with a blank email or password.
    #[error("email and password are required")]
    InvalidCredentials,
}

impl ServiceError {
    /// Whether this failure should be shown to the shopper rather than
    /// treated as a server error.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Shop(_) | Self::InvalidCredentials)
    }
}

/// Simulated network latency.
///
/// Each service call sleeps for a uniformly random duration in
/// `[min, max]` before completing. Only timing is affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min: Duration,
    max: Duration,
}

impl Latency {
    /// Latency drawn from `[min, max]`. The bounds are swapped if reversed.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A constant delay.
    #[must_use]
    pub const fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    /// No delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> Duration {
        self.max
    }

    /// Pick a delay within the bounds.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            self.min
        } else {
            rand::rng().random_range(self.min..=self.max)
        }
    }

    /// Sleep for a sampled delay.
    pub async fn simulate(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_millis(400))
    }
}

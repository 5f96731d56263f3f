//! Type-safe price representation using decimal arithmetic.
//!
//! All monetary values in Mockshop are [`Decimal`] US dollar amounts
//! (dollars, not cents). Rounding to cents always goes through
//! [`round_money`] so every computed value rounds the same way.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round an amount to two decimal places, halves away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A US dollar price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in dollars, not cents.
    pub amount: Decimal,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn usd_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, 2))
    }

    /// A zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }
}

/// Formats for display, e.g. `$19.99`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", round_money(self.amount))
    }
}

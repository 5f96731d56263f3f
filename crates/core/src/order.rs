//! Checkout input and confirmation types.
//!
//! Orders are never stored. A confirmation exists only in the response to a
//! successful checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::PricedCart;
use crate::types::OrderId;

/// Details collected by the checkout form.
///
/// Only presence is checked (see [`OrderDetails::missing_fields`]); the values
/// themselves are accepted as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl OrderDetails {
    /// Names of the fields that are blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub customer_name: String,
    /// The cart as it was priced at checkout time.
    pub cart: PricedCart,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_reports_blank_values() {
        let details = OrderDetails {
            name: "Ada".to_string(),
            email: "   ".to_string(),
            address: String::new(),
        };
        assert_eq!(details.missing_fields(), vec!["email", "address"]);
    }

    #[test]
    fn test_complete_details_have_no_missing_fields() {
        let details = OrderDetails {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Analytical Way".to_string(),
        };
        assert!(details.missing_fields().is_empty());
    }
}

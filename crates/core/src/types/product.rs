//! Product type.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product in the catalog.
///
/// Products are immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g. `p1`).
    pub id: ProductId,
    /// Display name, unique within the catalog.
    pub name: String,
    /// Unit price (never negative).
    pub price: Price,
    /// Image reference (a static asset path).
    pub image: String,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, `AsRef<str>` and `Borrow<str>`
///
/// `Borrow<str>` lets maps keyed by the ID be queried with a plain `&str`.
///
/// # Example
///
/// ```rust
/// # use mockshop_core::define_id;
/// define_id!(SkuId);
/// define_id!(BasketId);
///
/// let sku = SkuId::new("p1");
/// let basket = BasketId::new("p1");
///
/// // These are different types, so this won't compile:
/// // let _: SkuId = basket;
/// # assert_eq!(sku.as_str(), basket.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::std::string::String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<::std::string::String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> ::std::string::String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<::std::string::String> for $name {
            fn from(id: ::std::string::String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(OrderId);

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("p1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");

        let parsed: ProductId = serde_json::from_str("\"p9\"").unwrap();
        assert_eq!(parsed.as_str(), "p9");
    }

    #[test]
    fn test_map_keyed_by_id_is_queryable_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ProductId::new("p2"), 3_u32);
        assert_eq!(map.get("p2"), Some(&3));
        assert_eq!(map.get("p3"), None);
    }

    #[test]
    fn test_display_matches_inner_value() {
        assert_eq!(OrderId::new("ORD-1").to_string(), "ORD-1");
    }
}

//! Per-visitor key-value storage.
//!
//! Everything the storefront remembers about a visitor (cart, login state,
//! pending messages) lives in a string-keyed store of serialized text values.
//! Services only ever talk to the [`KeyValueStore`] trait:
//!
//! - [`SessionStorage`] - backed by the visitor's `tower-sessions` session,
//!   used when serving requests
//! - [`MemoryStore`] - a process-local map, used in tests and by the CLI
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `cart` | JSON object of product ID to quantity |
//! | `auth_token` | Opaque login token |
//! | `auth_user` | JSON user record (`{"email": ...}`) |
//! | `flash` | One-shot message shown on the next render |
//!
//! There is no versioning or migration: a value that fails to parse is
//! treated as absent.

mod memory;
mod session;

use std::future::Future;

pub use memory::MemoryStore;
pub use session::SessionStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// Key for the cart mapping.
    pub const CART: &str = "cart";

    /// Key for the opaque login token.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for the logged-in user record.
    pub const AUTH_USER: &str = "auth_user";

    /// Key for the pending blocking message.
    pub const FLASH: &str = "flash";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The session backend failed to load or save.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A value could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend is unusable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-keyed store of serialized text values.
///
/// Each call is independent: there is no locking or transaction spanning a
/// read and a later write.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any existing value.
    fn set(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Read and parse a JSON value.
///
/// A value that does not parse as `T` is reported as absent.
///
/// # Errors
///
/// Returns `StorageError` only if the backend itself fails.
pub async fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!(key, error = %e, "Ignoring malformed stored value");
            Ok(None)
        }
    }
}

/// Serialize a value as JSON and store it.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the backend write fails.
pub async fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore,
    T: Serialize + Sync,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[tokio::test]
    async fn test_json_roundtrip() {
        let store = MemoryStore::new();
        let mut value = BTreeMap::new();
        value.insert("p1".to_string(), 2_u32);

        write_json(&store, keys::CART, &value).await.unwrap();

        assert_eq!(
            store.get(keys::CART).await.unwrap().as_deref(),
            Some(r#"{"p1":2}"#)
        );
        let read: Option<BTreeMap<String, u32>> = read_json(&store, keys::CART).await.unwrap();
        assert_eq!(read, Some(value));
    }

    #[tokio::test]
    async fn test_malformed_value_reads_as_absent() {
        let store = MemoryStore::new();
        store
            .set(keys::CART, "{not json".to_string())
            .await
            .unwrap();

        let read: Option<BTreeMap<String, u32>> = read_json(&store, keys::CART).await.unwrap();
        assert!(read.is_none());
    }

    #[tokio::test]
    async fn test_missing_value_reads_as_absent() {
        let store = MemoryStore::new();
        let read: Option<String> = read_json(&store, keys::AUTH_USER).await.unwrap();
        assert!(read.is_none());
    }
}

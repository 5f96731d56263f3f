//! Session-backed key-value store.
//!
//! Each visitor's `tower-sessions` session is their private key-value space,
//! identified by the session cookie. Values are stored as JSON strings so the
//! stored form matches every other backend.

use tower_sessions::Session;

use super::{KeyValueStore, StorageError};

/// Key-value store over the current visitor's session.
#[derive(Clone)]
pub struct SessionStorage {
    session: Session,
}

impl SessionStorage {
    /// Wrap the session extracted for the current request.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl KeyValueStore for SessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.session.get::<String>(key).await {
            Ok(value) => Ok(value),
            // A value of some other shape is as good as missing.
            Err(tower_sessions::session::Error::SerdeJson(e)) => {
                tracing::debug!(key, error = %e, "Ignoring non-string session value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.session.insert(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.session.remove_value(key).await?;
        Ok(())
    }
}

//! One-shot blocking messages.
//!
//! A handler that wants to tell the visitor something (an error, or a
//! confirmation) stores a [`Flash`] and redirects. The next full page render
//! takes it out of storage and shows it as a modal dialog the visitor has to
//! dismiss. Each message is shown exactly once.

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StorageError, keys, write_json};

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Info,
    Error,
}

/// A message waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    /// An informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    /// An error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// Whether this is an error message (used by templates for styling).
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == FlashKind::Error
    }
}

/// Queue a message for the next render, replacing any pending one.
///
/// # Errors
///
/// Returns `StorageError` if the store fails.
pub async fn push_flash<S: KeyValueStore>(store: &S, flash: &Flash) -> Result<(), StorageError> {
    write_json(store, keys::FLASH, flash).await
}

/// Take the pending message, if any.
///
/// Whatever is stored under the key is removed, including values that do not
/// parse. Storage problems are logged and treated as "no message".
pub async fn take_flash<S: KeyValueStore>(store: &S) -> Option<Flash> {
    let raw = match store.get(keys::FLASH).await {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash message");
            return None;
        }
    };

    if let Err(e) = store.remove(keys::FLASH).await {
        tracing::warn!(error = %e, "Failed to clear flash message");
    }

    serde_json::from_str(&raw)
        .inspect_err(|e| tracing::debug!(error = %e, "Dropping malformed flash message"))
        .ok()
}

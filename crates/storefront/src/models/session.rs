//! Session-related types.
//!
//! Types stored in the visitor's storage for login state.

use serde::{Deserialize, Serialize};

/// Stored record of the logged-in user.
///
/// Email only; the demo keeps no other profile data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Email exactly as the visitor typed it.
    pub email: String,
}

impl CurrentUser {
    /// Create a user record.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

//! Unified error handling with Sentry integration.
//!
//! Most shopper mistakes (unknown product, empty cart, blank login) never
//! reach this type: handlers turn them into a blocking message and re-render.
//! `AppError` covers what is left, and captures server errors to Sentry before
//! responding.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mockshop_core::ShopError;
use thiserror::Error;

use crate::services::ServiceError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The visitor's storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A service call failed.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Service(err) => match err {
                ServiceError::Shop(ShopError::NotFound(_)) => StatusCode::NOT_FOUND,
                ServiceError::Shop(ShopError::EmptyCart) => StatusCode::CONFLICT,
                ServiceError::InvalidCredentials => StatusCode::BAD_REQUEST,
                ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Service(err) if err.is_user_facing() => err.to_string(),
            Self::Storage(_) | Self::Service(_) => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

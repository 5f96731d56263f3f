//! Application state shared across handlers.

use std::sync::Arc;

use mockshop_core::Catalog;

use crate::config::StorefrontConfig;
use crate::services::{CartService, CatalogService, Latency, SessionService};
use crate::storage::KeyValueStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, configuration and per-request service constructors.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state with the demo catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::demo(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Simulated latency for service calls.
    #[must_use]
    pub fn latency(&self) -> Latency {
        self.inner.config.latency
    }

    /// Catalog service.
    #[must_use]
    pub fn catalog_service(&self) -> CatalogService<'_> {
        CatalogService::new(self.catalog(), self.latency())
    }

    /// Cart service over a visitor's storage.
    #[must_use]
    pub fn cart_service<'a, S: KeyValueStore>(&'a self, store: &'a S) -> CartService<'a, S> {
        CartService::new(store, self.catalog(), self.latency())
    }

    /// Session service over a visitor's storage.
    #[must_use]
    pub fn session_service<'a, S: KeyValueStore>(&'a self, store: &'a S) -> SessionService<'a, S> {
        SessionService::new(store, self.latency())
    }
}

//! Data shared by every full page: the header widget and the pending message.
//!
//! The header is recomputed from storage on every render, so any mutation
//! followed by a redirect shows the new item count and login state.

use crate::middleware::{Flash, take_flash};
use crate::state::AppState;
use crate::storage::KeyValueStore;

/// Header widget data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderView {
    /// Total units in the cart.
    pub item_count: u64,
    /// Email of the logged-in user, if any.
    pub user_email: Option<String>,
}

/// Everything the base layout needs.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub header: HeaderView,
    /// Blocking message to show as a modal dialog.
    pub flash: Option<Flash>,
}

impl PageContext {
    /// Load the header and take the pending message.
    pub async fn load<S: KeyValueStore>(state: &AppState, store: &S) -> Self {
        let header = HeaderView::load(state, store).await;
        let flash = take_flash(store).await;
        Self { header, flash }
    }

    /// Show `flash` unless a message was already pending.
    ///
    /// The pending message has been taken out of storage, so dropping it
    /// would lose it for good.
    #[must_use]
    pub fn or_flash(mut self, flash: Flash) -> Self {
        self.flash.get_or_insert(flash);
        self
    }
}

impl HeaderView {
    /// Read item count and login state.
    ///
    /// A storage failure renders as an empty cart; the page itself still
    /// renders.
    pub async fn load<S: KeyValueStore>(state: &AppState, store: &S) -> Self {
        let item_count = state
            .cart_service(store)
            .item_count()
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read cart for header");
                0
            });
        let user_email = state
            .session_service(store)
            .current_user()
            .await
            .map(|user| user.email);

        Self {
            item_count,
            user_email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::middleware::push_flash;
    use crate::services::Latency;
    use crate::storage::MemoryStore;

    fn state() -> AppState {
        AppState::new(StorefrontConfig {
            latency: Latency::none(),
            ..StorefrontConfig::default()
        })
    }

    #[tokio::test]
    async fn test_header_reflects_cart_and_login() {
        let state = state();
        let store = MemoryStore::new();

        assert_eq!(HeaderView::load(&state, &store).await, HeaderView::default());

        state.cart_service(&store).add_item("p1", 2).await.unwrap();
        state.cart_service(&store).add_item("p2", 1).await.unwrap();
        state
            .session_service(&store)
            .login("shopper@example.com", "pw")
            .await
            .unwrap();

        let header = HeaderView::load(&state, &store).await;
        assert_eq!(header.item_count, 3);
        assert_eq!(header.user_email.as_deref(), Some("shopper@example.com"));
    }

    #[tokio::test]
    async fn test_page_context_consumes_flash() {
        let state = state();
        let store = MemoryStore::new();
        push_flash(&store, &Flash::info("hello")).await.unwrap();

        let page = PageContext::load(&state, &store).await;
        assert_eq!(page.flash, Some(Flash::info("hello")));

        let page = PageContext::load(&state, &store).await;
        assert!(page.flash.is_none());
    }

    #[tokio::test]
    async fn test_pending_flash_wins_over_request_flash() {
        let state = state();
        let store = MemoryStore::new();
        push_flash(&store, &Flash::error("earlier")).await.unwrap();

        let page = PageContext::load(&state, &store)
            .await
            .or_flash(Flash::info("now"));
        assert_eq!(page.flash, Some(Flash::error("earlier")));

        let page = PageContext::load(&state, &store)
            .await
            .or_flash(Flash::info("now"));
        assert_eq!(page.flash, Some(Flash::info("now")));
    }
}

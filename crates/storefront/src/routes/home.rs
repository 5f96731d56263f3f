//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use super::layout::PageContext;
use super::products::ProductView;
use crate::filters;
use crate::state::AppState;
use crate::storage::SessionStorage;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub products: Vec<ProductView>,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = SessionStorage::new(session);

    let products = state
        .catalog_service()
        .list_products()
        .await
        .iter()
        .map(ProductView::from)
        .collect();

    HomeTemplate {
        page: PageContext::load(&state, &store).await,
        products,
    }
}

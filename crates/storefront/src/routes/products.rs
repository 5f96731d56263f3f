//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use mockshop_core::Product;
use tower_sessions::Session;
use tracing::instrument;

use super::layout::PageContext;
use crate::filters;
use crate::state::AppState;
use crate::storage::SessionStorage;

/// Product display data for templates.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub page: PageContext,
    pub products: Vec<ProductView>,
}

/// Legacy product cards page template.
///
/// The cards on this page are written directly in the template rather than
/// generated from the catalog; their add buttons submit the product name.
#[derive(Template, WebTemplate)]
#[template(path = "products/legacy.html")]
pub struct LegacyProductsTemplate {
    pub page: PageContext,
}

/// Display the product grid.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = SessionStorage::new(session);

    let products = state
        .catalog_service()
        .list_products()
        .await
        .iter()
        .map(ProductView::from)
        .collect();

    ProductsIndexTemplate {
        page: PageContext::load(&state, &store).await,
        products,
    }
}

/// Display the statically authored product cards.
#[instrument(skip(state, session))]
pub async fn legacy(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = SessionStorage::new(session);

    LegacyProductsTemplate {
        page: PageContext::load(&state, &store).await,
    }
}

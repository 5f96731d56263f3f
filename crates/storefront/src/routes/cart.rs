//! Cart route handlers.
//!
//! Mutations redirect back to the page that submitted them (or the cart
//! page), which re-renders the header count and the cart table from storage.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use mockshop_core::{CartSummary, LineItem, PricedCart};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::layout::PageContext;
use super::redirect_back;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{Flash, push_flash};
use crate::services::ServiceError;
use crate::state::AppState;
use crate::storage::{KeyValueStore, SessionStorage};

/// Cart line display data for templates.
#[derive(Clone, Debug)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    /// False for entries whose product has left the catalog.
    pub in_catalog: bool,
}

impl From<&LineItem> for CartLineView {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            name: line.name.clone(),
            image: line.image.clone(),
            unit_price: line.unit_price.to_string(),
            quantity: line.quantity,
            line_total: line.line_total.to_string(),
            in_catalog: line.in_catalog,
        }
    }
}

/// Cart display data for templates.
#[derive(Clone, Debug)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&PricedCart {
            lines: Vec::new(),
            summary: CartSummary::empty(),
        })
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&PricedCart> for CartView {
    fn from(cart: &PricedCart) -> Self {
        Self {
            lines: cart.lines.iter().map(CartLineView::from).collect(),
            subtotal: cart.summary.subtotal.to_string(),
            shipping: cart.summary.shipping.to_string(),
            tax: cart.summary.tax.to_string(),
            total: cart.summary.total.to_string(),
            item_count: cart.summary.item_count,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    /// Defaults to 1. Kept as text so a bad value becomes a message rather
    /// than a rejected request.
    pub quantity: Option<String>,
    pub redirect: Option<String>,
}

/// Legacy add-by-name form data.
#[derive(Debug, Deserialize)]
pub struct AddByNameForm {
    pub name: String,
    pub redirect: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Parse a quantity field. Blank means `default`.
fn parse_quantity(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => value.parse().ok(),
    }
}

/// Turn a shopper-caused failure into a blocking message.
///
/// Server-side failures are returned as errors instead.
pub(super) async fn report<S: KeyValueStore>(store: &S, err: ServiceError) -> Result<()> {
    if !err.is_user_facing() {
        return Err(err.into());
    }
    tracing::warn!(error = %err, "Interaction failed");
    push_flash(store, &Flash::error(err.to_string())).await?;
    Ok(())
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let store = SessionStorage::new(session);
    let cart = state.cart_service(&store).get_cart().await?;

    Ok(CartShowTemplate {
        page: PageContext::load(&state, &store).await,
        cart: CartView::from(&cart),
    })
}

/// Add a catalog product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let store = SessionStorage::new(session);
    let back = redirect_back(form.redirect.as_deref(), "/cart");

    let Some(quantity) = parse_quantity(form.quantity.as_deref(), 1) else {
        push_flash(&store, &Flash::error("Quantity must be a whole number")).await?;
        return Ok(back);
    };

    match state
        .cart_service(&store)
        .add_item(&form.product_id, quantity)
        .await
    {
        Ok(_) => add_breadcrumb(
            "cart",
            "Added item",
            Some(&[("product_id", form.product_id.as_str())]),
        ),
        Err(e) => report(&store, e).await?,
    }

    Ok(back)
}

/// Add a product by its exact display name.
///
/// Used by the statically authored cards, which only know the name.
#[instrument(skip(state, session))]
pub async fn add_by_name(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddByNameForm>,
) -> Result<Redirect> {
    let store = SessionStorage::new(session);
    let back = redirect_back(form.redirect.as_deref(), "/products/legacy");
    let name = form.name.trim();

    let Some(product) = state.catalog_service().find_by_name(name) else {
        tracing::warn!(name, "Legacy card did not match a catalog product");
        push_flash(&store, &Flash::error(format!("Product \"{name}\" not found"))).await?;
        return Ok(back);
    };

    if let Err(e) = state
        .cart_service(&store)
        .add_item(product.id.as_str(), 1)
        .await
    {
        report(&store, e).await?;
    }

    Ok(back)
}

/// Set the quantity of a cart line; zero or below removes it.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let store = SessionStorage::new(session);

    let Some(quantity) = parse_quantity(Some(&form.quantity), 0) else {
        push_flash(&store, &Flash::error("Quantity must be a whole number")).await?;
        return Ok(Redirect::to("/cart"));
    };

    state
        .cart_service(&store)
        .set_quantity(&form.product_id, quantity)
        .await?;

    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let store = SessionStorage::new(session);

    state
        .cart_service(&store)
        .remove_item(&form.product_id)
        .await?;

    Ok(Redirect::to("/cart"))
}

/// Get cart count badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let store = SessionStorage::new(session);
    let count = state.cart_service(&store).item_count().await?;

    Ok(CartCountTemplate { count })
}

#[cfg(test)]
mod tests {
    use mockshop_core::{Catalog, CartItems, ProductId, price_cart};

    use super::*;
    use crate::storage::{MemoryStore, keys};

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(None, 1), Some(1));
        assert_eq!(parse_quantity(Some("  "), 1), Some(1));
        assert_eq!(parse_quantity(Some(" 3 "), 1), Some(3));
        assert_eq!(parse_quantity(Some("-2"), 1), Some(-2));
        assert_eq!(parse_quantity(Some("two"), 1), None);
        assert_eq!(parse_quantity(Some("1.5"), 1), None);
    }

    #[test]
    fn test_cart_view_formats_summary() {
        let catalog = Catalog::demo();
        let mut items = CartItems::new();
        items.add(ProductId::new("p1"), 2);
        items.add(ProductId::new("p3"), 1);

        let view = CartView::from(&price_cart(&items, &catalog));
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].line_total, "$90.00");
        assert_eq!(view.subtotal, "$150.00");
        assert_eq!(view.shipping, "$5.00");
        assert_eq!(view.tax, "$10.50");
        assert_eq!(view.total, "$165.50");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.total, "$0.00");
        assert_eq!(view.shipping, "$0.00");
    }

    #[tokio::test]
    async fn test_report_flashes_user_facing_errors() {
        let store = MemoryStore::new();
        report(&store, ServiceError::InvalidCredentials).await.unwrap();

        let stored = store.get(keys::FLASH).await.unwrap().unwrap();
        assert!(stored.contains("email and password are required"));
    }

    #[tokio::test]
    async fn test_report_escalates_storage_errors() {
        let store = MemoryStore::new();
        let err = ServiceError::Storage(crate::storage::StorageError::Unavailable(
            "down".to_string(),
        ));

        assert!(report(&store, err).await.is_err());
        assert!(store.is_empty().unwrap());
    }
}

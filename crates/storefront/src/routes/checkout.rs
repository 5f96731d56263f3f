//! Checkout route handlers.
//!
//! The order is never sent anywhere: a successful submit empties the cart and
//! renders a confirmation with the generated order ID.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use mockshop_core::{OrderConfirmation, OrderDetails, ShopError};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::{CartView, report};
use super::layout::PageContext;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{Flash, push_flash};
use crate::services::ServiceError;
use crate::state::AppState;
use crate::storage::SessionStorage;

/// Checkout form data.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl From<CheckoutForm> for OrderDetails {
    fn from(form: CheckoutForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            address: form.address,
        }
    }
}

/// Order confirmation display data.
#[derive(Clone, Debug)]
pub struct ConfirmationView {
    pub order_id: String,
    pub customer_name: String,
    pub placed_at: String,
    pub cart: CartView,
}

impl From<&OrderConfirmation> for ConfirmationView {
    fn from(order: &OrderConfirmation) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            customer_name: order.customer_name.clone(),
            placed_at: order.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            cart: CartView::from(&order.cart),
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
    /// Prefilled from the logged-in user.
    pub email: String,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub page: PageContext,
    pub order: ConfirmationView,
}

/// Display the checkout form and order summary.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let store = SessionStorage::new(session);
    let cart = state.cart_service(&store).get_cart().await?;
    let page = PageContext::load(&state, &store).await;

    Ok(CheckoutShowTemplate {
        email: page.header.user_email.clone().unwrap_or_default(),
        page,
        cart: CartView::from(&cart),
    })
}

/// Place the order.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let store = SessionStorage::new(session);
    let details = OrderDetails::from(form);

    let missing = details.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Checkout submitted with blank fields");
        let message = format!("Please fill in: {}", missing.join(", "));
        push_flash(&store, &Flash::error(message)).await?;
        return Ok(Redirect::to("/checkout").into_response());
    }

    let order = match state.cart_service(&store).checkout(&details).await {
        Ok(order) => order,
        Err(e @ ServiceError::Shop(ShopError::EmptyCart)) => {
            report(&store, e).await?;
            return Ok(Redirect::to("/cart").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_id", order.order_id.as_str())]),
    );

    let message = format!("Order {} placed. Thank you!", order.order_id);
    let page = PageContext::load(&state, &store)
        .await
        .or_flash(Flash::info(message));

    Ok(ConfirmationTemplate {
        page,
        order: ConfirmationView::from(&order),
    }
    .into_response())
}

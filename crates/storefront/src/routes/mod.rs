//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (product grid)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product grid
//! GET  /products/legacy        - Statically authored product cards
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add by product ID
//! POST /cart/add-by-name       - Add by exact product name (legacy cards)
//! POST /cart/update            - Set quantity
//! POST /cart/remove            - Remove item
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout form
//! POST /checkout               - Place order
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//! ```
//!
//! Every mutating route performs its mutation and then redirects to a page
//! that re-renders the affected sections. Failures a shopper can cause are
//! reported through a blocking message (see [`crate::middleware::flash`]).

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod layout;
pub mod products;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/legacy", get(products::legacy))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/add-by-name", post(cart::add_by_name))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .nest("/auth", auth_routes())
}

/// Redirect to a local path supplied by a form, or to `fallback`.
///
/// Only absolute paths on this site are honoured. Full URLs, protocol-relative
/// `//host` paths and anything with control characters fall back.
#[must_use]
pub fn redirect_back(target: Option<&str>, fallback: &str) -> Redirect {
    let target = target
        .map(str::trim)
        .filter(|t| {
            t.starts_with('/')
                && !t.starts_with("//")
                && !t.contains('\\')
                && !t.chars().any(char::is_control)
        })
        .unwrap_or(fallback);
    Redirect::to(target)
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;
    use axum::response::IntoResponse;

    use super::*;

    fn location(redirect: Redirect) -> String {
        redirect
            .into_response()
            .headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_redirect_back_accepts_local_paths() {
        assert_eq!(location(redirect_back(Some("/products"), "/cart")), "/products");
    }

    #[test]
    fn test_redirect_back_rejects_external_targets() {
        assert_eq!(location(redirect_back(Some("https://evil.example"), "/cart")), "/cart");
        assert_eq!(location(redirect_back(Some("//evil.example"), "/cart")), "/cart");
        assert_eq!(location(redirect_back(Some("/\\evil.example"), "/cart")), "/cart");
        assert_eq!(location(redirect_back(None, "/cart")), "/cart");
    }

    #[test]
    fn test_redirect_back_rejects_control_characters() {
        assert_eq!(
            location(redirect_back(Some("/cart\nX-Injected: 1"), "/products")),
            "/products"
        );
        assert_eq!(location(redirect_back(Some("/cart\r"), "/products")), "/cart");
        assert_eq!(location(redirect_back(Some("/a\tb"), "/products")), "/products");
    }
}

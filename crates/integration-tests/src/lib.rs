//! Integration tests for Mockshop.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`;
//! no port is bound. [`TestClient`] carries the session cookie between
//! requests the way a browser would, so a sequence of calls behaves like one
//! visitor.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mockshop-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use mockshop_storefront::config::StorefrontConfig;
use mockshop_storefront::services::Latency;
use mockshop_storefront::state::AppState;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

/// One visitor talking to an in-process storefront.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Whether the page carries an open message dialog.
    #[must_use]
    pub fn has_dialog(&self) -> bool {
        self.body.contains("<dialog open")
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// A fresh visitor against a fresh storefront with no simulated latency.
    #[must_use]
    pub fn new() -> Self {
        let state = AppState::new(StorefrontConfig {
            latency: Latency::none(),
            ..StorefrontConfig::default()
        });
        Self::with_app(mockshop_storefront::app(state, MemoryStore::default()))
    }

    /// A fresh visitor against an existing router (shared session store).
    #[must_use]
    pub const fn with_app(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// The router, for creating other visitors of the same storefront.
    #[must_use]
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// `GET` a path.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// `POST` an urlencoded form.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// `POST` a form and follow the redirect with a `GET`.
    pub async fn submit(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let response = self.post_form(uri, fields).await;
        assert_eq!(
            response.status,
            StatusCode::SEE_OTHER,
            "expected redirect from {uri}, got body: {}",
            response.body
        );
        let location = response.location().unwrap().to_string();
        self.get(&location).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

/// Extract the text of the cart count badge.
#[must_use]
pub fn cart_count(body: &str) -> Option<u64> {
    let start = body.find("class=\"cart-count\"")?;
    let rest = &body[start..];
    let open = rest.find('>')? + 1;
    let close = rest[open..].find('<')?;
    rest[open..open + close].trim().parse().ok()
}

//! Integration tests for the checkout flow.

use axum::http::StatusCode;
use mockshop_integration_tests::{TestClient, cart_count};

const DETAILS: [(&str, &str); 3] = [
    ("name", "Ada Lovelace"),
    ("email", "ada@example.com"),
    ("address", "12 Analytical Row"),
];

#[tokio::test]
async fn test_checkout_with_empty_cart() {
    let mut client = TestClient::new();

    let response = client.post_form("/checkout", &DETAILS).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));

    let page = client.get("/cart").await;
    assert!(page.has_dialog());
    assert!(page.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_checkout_requires_every_field() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &[("product_id", "p1")]).await;

    let page = client
        .submit(
            "/checkout",
            &[("name", "Ada"), ("email", " "), ("address", "")],
        )
        .await;
    assert!(page.has_dialog());
    assert!(page.body.contains("Please fill in: email, address"));

    // Nothing was ordered
    assert_eq!(cart_count(&page.body), Some(1));
}

#[tokio::test]
async fn test_successful_checkout_clears_cart() {
    let mut client = TestClient::new();
    client
        .post_form("/cart/add", &[("product_id", "p1"), ("quantity", "2")])
        .await;
    client.post_form("/cart/add", &[("product_id", "p3")]).await;

    let form = client.get("/checkout").await;
    assert!(form.body.contains("$165.50"));

    let confirmation = client.post_form("/checkout", &DETAILS).await;
    assert_eq!(confirmation.status, StatusCode::OK);
    assert!(confirmation.has_dialog());
    assert!(confirmation.body.contains("ORD-"));
    assert!(confirmation.body.contains("Ada Lovelace"));
    assert!(confirmation.body.contains("$165.50"));
    assert_eq!(cart_count(&confirmation.body), Some(0));

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
    assert!(!cart.has_dialog());
}

#[tokio::test]
async fn test_checkout_keeps_pending_message() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &[("product_id", "p1")]).await;
    // Leaves a message pending without rendering a page
    client.post_form("/cart/add", &[("product_id", "p99")]).await;

    let confirmation = client.post_form("/checkout", &DETAILS).await;
    assert_eq!(confirmation.status, StatusCode::OK);
    assert!(confirmation.body.contains("Product not found: p99"));
    assert!(confirmation.body.contains("ORD-"));

    let cart = client.get("/cart").await;
    assert!(!cart.has_dialog());
}

#[tokio::test]
async fn test_checkout_prefills_logged_in_email() {
    let mut client = TestClient::new();
    client
        .post_form("/auth/login", &[("email", "ada@example.com"), ("password", "x")])
        .await;
    client.post_form("/cart/add", &[("product_id", "p2")]).await;

    let form = client.get("/checkout").await;
    assert!(form.body.contains("value=\"ada@example.com\""));
}

//! Integration tests for the statically authored product cards.

use mockshop_integration_tests::{TestClient, cart_count};

#[tokio::test]
async fn test_legacy_page_renders_cards() {
    let mut client = TestClient::new();

    let page = client.get("/products/legacy").await;
    assert!(page.body.contains("action=\"/cart/add-by-name\""));
    assert!(page.body.contains("Wool Throw Blanket"));
}

#[tokio::test]
async fn test_add_by_exact_name() {
    let mut client = TestClient::new();

    let page = client
        .submit("/cart/add-by-name", &[("name", "Wool Throw Blanket")])
        .await;
    assert!(!page.has_dialog());
    assert_eq!(cart_count(&page.body), Some(1));

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Wool Throw Blanket"));
    assert!(cart.body.contains("$60.00"));
}

#[tokio::test]
async fn test_unmatched_name_shows_message() {
    let mut client = TestClient::new();

    let page = client
        .submit("/cart/add-by-name", &[("name", "Brass Reading Lamp")])
        .await;
    assert!(page.has_dialog());
    assert!(page.body.contains("Brass Reading Lamp"));
    assert!(page.body.contains("not found"));
    assert_eq!(cart_count(&page.body), Some(0));
}

#[tokio::test]
async fn test_name_match_is_exact() {
    let mut client = TestClient::new();

    let page = client
        .submit("/cart/add-by-name", &[("name", "wool throw blanket")])
        .await;
    assert!(page.has_dialog());
    assert_eq!(cart_count(&page.body), Some(0));
}

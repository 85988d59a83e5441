//! Live Storefront API tests.
//!
//! These tests require valid Shopify credentials in the environment (or a
//! `.env` file): `SHOPIFY_STORE`, `SHOPIFY_STOREFRONT_PUBLIC_TOKEN` and
//! `STOREFRONT_BASE_URL`.
//!
//! Run with: cargo test -p aula-integration-tests -- --ignored

use aula_core::{PaginationRequest, SearchType};
use aula_storefront::config::StorefrontConfig;
use aula_storefront::search::{SEARCH_PAGE_SIZE, normalize};
use aula_storefront::shopify::StorefrontClient;

fn live_client() -> StorefrontClient {
    let config = StorefrontConfig::from_env().unwrap_or_else(|e| panic!("config: {e}"));
    StorefrontClient::new(&config.shopify)
}

#[tokio::test]
#[ignore = "Requires Shopify credentials"]
async fn test_featured_collections() {
    let collections = live_client()
        .get_featured_collections()
        .await
        .unwrap_or_else(|e| panic!("featured collections: {e}"));

    assert!(collections.len() <= 3);
    for collection in &collections {
        assert!(collection.path().starts_with("/collections/"));
    }
}

#[tokio::test]
#[ignore = "Requires Shopify credentials"]
async fn test_recommended_products() {
    let products = live_client()
        .get_recommended_products()
        .await
        .unwrap_or_else(|e| panic!("recommended products: {e}"));

    assert!(products.len() <= 6);
}

#[tokio::test]
#[ignore = "Requires Shopify credentials"]
async fn test_search_first_page() {
    let results = live_client()
        .search("a", &PaginationRequest::first_page(SEARCH_PAGE_SIZE))
        .await
        .unwrap_or_else(|e| panic!("search: {e}"));

    let page_size = usize::try_from(SEARCH_PAGE_SIZE).unwrap_or(usize::MAX);
    assert!(results.products.products.len() <= page_size);
    assert_eq!(
        results.total_results,
        results.products.products.len() + results.pages.len() + results.articles.len()
    );
}

#[tokio::test]
#[ignore = "Requires Shopify credentials"]
async fn test_predictive_search_products_only() {
    let result = live_client()
        .predictive_search("a", 4, &[SearchType::Product])
        .await
        .unwrap_or_else(|e| panic!("predictive search: {e}"));

    let normalized = normalize(result);
    for group in &normalized.results {
        assert_eq!(group.kind, SearchType::Product);
        assert!(group.items.len() <= 4);
    }
}

//! Integration tests for the Aula storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Router tests (no network)
//! cargo test -p aula-integration-tests
//!
//! # Live Storefront API tests (reads credentials from .env)
//! cargo test -p aula-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `routes` - full router driven with `tower::ServiceExt::oneshot`
//! - `storefront_api` - live Storefront API queries

use std::net::{IpAddr, Ipv4Addr};

use aula_storefront::config::{SentryConfig, ShopifyStorefrontConfig, StorefrontConfig};
use aula_storefront::state::AppState;
use axum::Router;
use url::Url;

/// Address used as the client IP for rate-limited routes.
pub const TEST_CLIENT_IP: &str = "203.0.113.7";

/// Configuration pointing at a store that is never contacted.
///
/// Tests using it must only exercise paths that skip the Storefront API.
///
/// # Panics
///
/// Panics if the hard-coded base URL does not parse.
#[must_use]
pub fn offline_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: Url::parse("http://localhost:3000").expect("valid test URL"),
        shop_name: aula_storefront::DEFAULT_SHOP_NAME.to_string(),
        shopify: ShopifyStorefrontConfig {
            store: "aula-test.invalid".to_string(),
            api_version: "2026-01".to_string(),
            storefront_public_token: "public-test-token".to_string(),
            storefront_private_token: None,
            country: None,
            language: None,
        },
        sentry: SentryConfig::default(),
    }
}

/// Full application router over [`offline_config`].
#[must_use]
pub fn offline_app() -> Router {
    aula_storefront::app(AppState::new(offline_config()))
}

//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                - Home page
//! GET  /fragments/recommended-products  - Recommended products (deferred fragment)
//!
//! # Search
//! GET  /search                          - Full search page
//! GET  /api/predictive-search           - Predictive search fragment (rate limited)
//!
//! # Apply
//! GET  /apply/thanks                    - Application confirmation
//!
//! # Catalogue
//! GET  /collections/{handle}            - Collection detail
//! GET  /products/{handle}               - Product detail
//! GET  /pages/{handle}                  - CMS page
//! GET  /blogs/{blog}/{article}          - Blog article
//! ```

pub mod apply;
pub mod blogs;
pub mod collections;
pub mod home;
pub mod pages;
pub mod products;
pub mod search;

use axum::{Router, routing::get};

use crate::middleware::predictive_search_rate_limiter;
use crate::state::AppState;

/// Create the search API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/predictive-search", get(search::predictive_search))
        .layer(predictive_search_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route(
            "/fragments/recommended-products",
            get(home::recommended_products),
        )
        // Search
        .route("/search", get(search::search_page))
        .nest("/api", api_routes())
        // Apply flow
        .route("/apply/thanks", get(apply::thanks))
        // Catalogue
        .route("/collections/{handle}", get(collections::show))
        .route("/products/{handle}", get(products::show))
        .route("/pages/{handle}", get(pages::show))
        .route("/blogs/{blog}/{article}", get(blogs::show))
}

//! Cache types for Storefront API responses.

use crate::shopify::types::{Article, Collection, Page, Product};

/// Cache key for catalogue reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    FeaturedCollections,
    RecommendedProducts,
    Collection(String),
    Product(String),
    Page(String),
    Article { blog: String, article: String },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Collections(Vec<Collection>),
    Products(Vec<Product>),
    Collection(Box<Collection>),
    Product(Box<Product>),
    Page(Box<Page>),
    Article(Box<Article>),
}

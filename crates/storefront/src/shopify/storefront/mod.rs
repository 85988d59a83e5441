//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` query types with `reqwest` 0.13 for HTTP.
//! Catalogue reads are cached using `moka` (5-minute TTL); search is not.

mod cache;
mod conversions;

pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use aula_core::{
    ArticleHandle, BlogHandle, CollectionHandle, PageHandle, PaginationRequest, ProductHandle,
    SearchType,
};
use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::ShopifyError;
use crate::shopify::types::{
    Article, Collection, Page, PredictiveSearchResult, Product, SearchResults,
};

use cache::{CacheKey, CacheValue};
use conversions::{
    convert_article, convert_collection, convert_featured_collection, convert_page,
    convert_predictive_search, convert_product, convert_product_card, convert_search,
};
use queries::{
    ArticleByHandle, CollectionByHandle, FeaturedCollections, PageByHandle, PredictiveSearch,
    ProductByHandle, RecommendedProducts, Search, article_by_handle, collection_by_handle,
    featured_collections, page_by_handle, predictive_search, product_by_handle,
    recommended_products, search,
};

/// Header for server-side private access tokens.
const PRIVATE_TOKEN_HEADER: &str = "Shopify-Storefront-Private-Token";
/// Header for public access tokens.
const PUBLIC_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides typed access to collections, products, content and search.
/// Catalogue reads are cached for 5 minutes.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: AccessToken,
    country: Option<String>,
    language: Option<String>,
    cache: Cache<CacheKey, CacheValue>,
}

enum AccessToken {
    Private(SecretString),
    Public(String),
}

impl AccessToken {
    fn header(&self) -> (&'static str, &str) {
        match self {
            Self::Private(token) => (PRIVATE_TOKEN_HEADER, token.expose_secret()),
            Self::Public(token) => (PUBLIC_TOKEN_HEADER, token.as_str()),
        }
    }
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// Uses the private token when configured, the public token otherwise.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        Self::with_endpoint(config, config.endpoint())
    }

    /// Client posting to `endpoint` instead of the store's API URL.
    fn with_endpoint(config: &ShopifyStorefrontConfig, endpoint: String) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let access_token = config.storefront_private_token.as_ref().map_or_else(
            || AccessToken::Public(config.storefront_public_token.clone()),
            |token| AccessToken::Private(token.clone()),
        );

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token,
                country: config.country.clone(),
                language: config.language.clone(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);
        let (header_name, token) = self.inner.access_token.header();

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(header_name, token)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %truncate(&response_text, 500),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![super::GraphQLError::message(format!(
                "HTTP {status}: {}",
                truncate(&response_text, 200)
            ))]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %truncate(&response_text, 500),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");

            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(super::GraphQLError::from).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                body = %truncate(&response_text, 500),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![super::GraphQLError::message("No data in response")])
        })
    }

    fn context(&self) -> (Option<String>, Option<String>) {
        (self.inner.country.clone(), self.inner.language.clone())
    }

    // =========================================================================
    // Homepage Methods
    // =========================================================================

    /// Get the three most recently updated collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_collections(&self) -> Result<Vec<Collection>, ShopifyError> {
        if let Some(CacheValue::Collections(collections)) =
            self.inner.cache.get(&CacheKey::FeaturedCollections).await
        {
            debug!("Cache hit for featured collections");
            return Ok(collections);
        }

        let (country, language) = self.context();
        let data = self
            .execute::<FeaturedCollections>(featured_collections::Variables { country, language })
            .await?;

        let collections: Vec<Collection> = data
            .collections
            .nodes
            .into_iter()
            .map(convert_featured_collection)
            .collect();

        self.inner
            .cache
            .insert(
                CacheKey::FeaturedCollections,
                CacheValue::Collections(collections.clone()),
            )
            .await;

        Ok(collections)
    }

    /// Get the six most recently updated products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_recommended_products(&self) -> Result<Vec<Product>, ShopifyError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::RecommendedProducts).await
        {
            debug!("Cache hit for recommended products");
            return Ok(products);
        }

        let (country, language) = self.context();
        let data = self
            .execute::<RecommendedProducts>(recommended_products::Variables { country, language })
            .await?;

        let products: Vec<Product> = data
            .products
            .nodes
            .into_iter()
            .map(convert_product_card)
            .collect();

        self.inner
            .cache
            .insert(
                CacheKey::RecommendedProducts,
                CacheValue::Products(products.clone()),
            )
            .await;

        Ok(products)
    }

    // =========================================================================
    // Search Methods (not cached)
    // =========================================================================

    /// Run a full search for products, pages and articles.
    ///
    /// Products are paginated by `pagination`; pages and articles return
    /// the first ten matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, pagination), fields(term = %term))]
    pub async fn search(
        &self,
        term: &str,
        pagination: &PaginationRequest,
    ) -> Result<SearchResults, ShopifyError> {
        let (country, language) = self.context();
        let variables = search::Variables {
            term: term.to_string(),
            first: pagination.first,
            last: pagination.last,
            start_cursor: pagination.start_cursor.clone(),
            end_cursor: pagination.end_cursor.clone(),
            country,
            language,
        };

        let data = self.execute::<Search>(variables).await?;
        let results = convert_search(data);

        debug!(total = results.total_results, "Search completed");
        Ok(results)
    }

    /// Run a predictive (type-ahead) search.
    ///
    /// `limit` applies to each resource type. An empty `types` slice
    /// searches every type.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn predictive_search(
        &self,
        term: &str,
        limit: i64,
        types: &[SearchType],
    ) -> Result<PredictiveSearchResult, ShopifyError> {
        let (country, language) = self.context();
        let variables = predictive_search::Variables {
            limit,
            limit_scope: predictive_search::PredictiveSearchLimitScope::Each,
            search_term: term.to_string(),
            types: (!types.is_empty()).then(|| types.to_vec()),
            country,
            language,
        };

        let data = self.execute::<PredictiveSearch>(variables).await?;

        Ok(data
            .predictive_search
            .map(convert_predictive_search)
            .unwrap_or_default())
    }

    // =========================================================================
    // Catalogue Methods
    // =========================================================================

    /// Get a collection by its handle, with its first `product_count`
    /// products.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_by_handle(
        &self,
        handle: &CollectionHandle,
        product_count: i64,
    ) -> Result<Collection, ShopifyError> {
        let cache_key = CacheKey::Collection(handle.to_string());

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(*collection);
        }

        let (country, language) = self.context();
        let variables = collection_by_handle::Variables {
            handle: handle.to_string(),
            first: Some(product_count),
            country,
            language,
        };

        let data = self.execute::<CollectionByHandle>(variables).await?;

        let collection = data
            .collection
            .map(convert_collection)
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection not found: {handle}")))?;

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(collection.clone())),
            )
            .await;

        Ok(collection)
    }

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(
        &self,
        handle: &ProductHandle,
    ) -> Result<Product, ShopifyError> {
        let cache_key = CacheKey::Product(handle.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let (country, language) = self.context();
        let variables = product_by_handle::Variables {
            handle: handle.to_string(),
            country,
            language,
        };

        let data = self.execute::<ProductByHandle>(variables).await?;

        let product = data
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a CMS page by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the page is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_page_by_handle(&self, handle: &PageHandle) -> Result<Page, ShopifyError> {
        let cache_key = CacheKey::Page(handle.to_string());

        if let Some(CacheValue::Page(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for page");
            return Ok(*page);
        }

        let (country, language) = self.context();
        let variables = page_by_handle::Variables {
            handle: handle.to_string(),
            country,
            language,
        };

        let data = self.execute::<PageByHandle>(variables).await?;

        let page = data
            .page
            .map(convert_page)
            .ok_or_else(|| ShopifyError::NotFound(format!("Page not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Page(Box::new(page.clone())))
            .await;

        Ok(page)
    }

    /// Get a blog article by blog and article handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the blog or article is not found or the API
    /// request fails.
    #[instrument(skip(self), fields(blog = %blog, article = %article))]
    pub async fn get_article(
        &self,
        blog: &BlogHandle,
        article: &ArticleHandle,
    ) -> Result<Article, ShopifyError> {
        let cache_key = CacheKey::Article {
            blog: blog.to_string(),
            article: article.to_string(),
        };

        if let Some(CacheValue::Article(cached)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for article");
            return Ok(*cached);
        }

        let (country, language) = self.context();
        let variables = article_by_handle::Variables {
            blog_handle: blog.to_string(),
            article_handle: article.to_string(),
            country,
            language,
        };

        let data = self.execute::<ArticleByHandle>(variables).await?;

        let not_found = || ShopifyError::NotFound(format!("Article not found: {blog}/{article}"));
        let blog_data = data.blog.ok_or_else(not_found)?;
        let article_data = blog_data.article_by_handle.ok_or_else(not_found)?;
        let converted = convert_article(blog_data.handle, blog_data.title, article_data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Article(Box::new(converted.clone())))
            .await;

        Ok(converted)
    }
}

/// First `max` characters of a response body, for logs.
fn truncate(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config(private: Option<&str>) -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_public_token: "public".to_string(),
            storefront_private_token: private.map(SecretString::from),
            country: None,
            language: None,
        }
    }

    #[test]
    fn test_private_token_preferred() {
        let client = StorefrontClient::new(&config(Some("private")));
        assert_eq!(
            client.inner.access_token.header(),
            (PRIVATE_TOKEN_HEADER, "private")
        );
    }

    #[test]
    fn test_public_token_fallback() {
        let client = StorefrontClient::new(&config(None));
        assert_eq!(
            client.inner.access_token.header(),
            (PUBLIC_TOKEN_HEADER, "public")
        );
        assert_eq!(
            client.inner.endpoint,
            "https://test.myshopify.com/api/2026-01/graphql.json"
        );
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("añb", 2), "añ");
        assert_eq!(truncate("ab", 10), "ab");
    }

    // =========================================================================
    // HTTP behaviour against a mock Storefront API
    // =========================================================================

    fn mock_client(server: &MockServer, private: Option<&str>) -> StorefrontClient {
        StorefrontClient::with_endpoint(&config(private), format!("{}/graphql.json", server.uri()))
    }

    fn featured_body() -> serde_json::Value {
        json!({
            "data": {
                "collections": { "nodes": [{
                    "id": "gid://shopify/Collection/1",
                    "title": "Diseño",
                    "handle": "diseno",
                    "image": null
                }]}
            }
        })
    }

    fn search_body() -> serde_json::Value {
        json!({
            "data": {
                "products": {
                    "nodes": [],
                    "pageInfo": {
                        "hasNextPage": false,
                        "hasPreviousPage": false,
                        "startCursor": null,
                        "endCursor": null
                    }
                },
                "pages": { "nodes": [] },
                "articles": { "nodes": [] }
            }
        })
    }

    fn graphql_errors(err: ShopifyError) -> Vec<crate::shopify::GraphQLError> {
        match err {
            ShopifyError::GraphQL(errors) => errors,
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    async fn respond_once(template: ResponseTemplate) -> (MockServer, StorefrontClient) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql.json"))
            .respond_with(template)
            .mount(&server)
            .await;
        let client = mock_client(&server, None);
        (server, client)
    }

    #[tokio::test]
    async fn test_throttled_uses_retry_after() {
        let (_server, client) =
            respond_once(ResponseTemplate::new(429).insert_header("Retry-After", "7")).await;
        let err = client.get_featured_collections().await.unwrap_err();
        assert!(matches!(err, ShopifyError::RateLimited(7)), "{err:?}");
    }

    #[tokio::test]
    async fn test_throttled_defaults_to_one_second() {
        let (_server, client) = respond_once(ResponseTemplate::new(429)).await;
        let err = client.get_featured_collections().await.unwrap_err();
        assert!(matches!(err, ShopifyError::RateLimited(1)), "{err:?}");

        let (_server, client) =
            respond_once(ResponseTemplate::new(429).insert_header("Retry-After", "soon")).await;
        let err = client.get_featured_collections().await.unwrap_err();
        assert!(matches!(err, ShopifyError::RateLimited(1)), "{err:?}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_graphql_error() {
        let (_server, client) =
            respond_once(ResponseTemplate::new(500).set_body_string("upstream exploded")).await;
        let err = client.get_featured_collections().await.unwrap_err();
        let errors = graphql_errors(err);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("HTTP 500"));
        assert!(errors[0].message.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_errors_array_is_graphql_error() {
        let body = json!({
            "errors": [
                { "message": "Throttled" },
                { "message": "Field 'x' doesn't exist", "path": ["collections"] }
            ]
        });
        let (_server, client) = respond_once(ResponseTemplate::new(200).set_body_json(body)).await;
        let err = client.get_featured_collections().await.unwrap_err();
        let errors = graphql_errors(err);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Throttled");
        assert_eq!(errors[1].path, vec!["collections".to_string()]);
    }

    #[tokio::test]
    async fn test_null_data_is_an_error() {
        let (_server, client) =
            respond_once(ResponseTemplate::new(200).set_body_json(json!({ "data": null }))).await;
        let err = client.get_featured_collections().await.unwrap_err();
        let errors = graphql_errors(err);
        assert_eq!(errors[0].message, "No data in response");
    }

    #[tokio::test]
    async fn test_unparseable_body_is_parse_error() {
        let (_server, client) =
            respond_once(ResponseTemplate::new(200).set_body_string("<html>")).await;
        let err = client.get_featured_collections().await.unwrap_err();
        assert!(matches!(err, ShopifyError::Parse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_private_token_header_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql.json"))
            .and(header(PRIVATE_TOKEN_HEADER, "private"))
            .respond_with(ResponseTemplate::new(200).set_body_json(featured_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server, Some("private"));
        let collections = client.get_featured_collections().await.unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].handle, "diseno");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get(PUBLIC_TOKEN_HEADER).is_none());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_public_token_header_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(PUBLIC_TOKEN_HEADER, "public"))
            .respond_with(ResponseTemplate::new(200).set_body_json(featured_body()))
            .expect(1)
            .mount(&server)
            .await;

        mock_client(&server, None)
            .get_featured_collections()
            .await
            .unwrap();
        server.verify().await;
    }

    #[tokio::test]
    async fn test_catalogue_reads_are_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(featured_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server, None);
        client.get_featured_collections().await.unwrap();
        client.get_featured_collections().await.unwrap();
        server.verify().await;
    }

    #[tokio::test]
    async fn test_search_is_never_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .expect(2)
            .mount(&server)
            .await;

        let client = mock_client(&server, None);
        let pagination = PaginationRequest::from_params(None, None, 8);
        client.search("rust", &pagination).await.unwrap();
        client.search("rust", &pagination).await.unwrap();
        server.verify().await;
    }

    #[tokio::test]
    async fn test_predictive_search_is_never_cached() {
        let server = MockServer::start().await;
        let body = json!({
            "data": {
                "predictiveSearch": {
                    "queries": [{
                        "text": "rust",
                        "styledText": "<b>ru</b>st",
                        "trackingParameters": null
                    }]
                }
            }
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(2)
            .mount(&server)
            .await;

        let client = mock_client(&server, None);
        let first = client.predictive_search("ru", 6, &[]).await.unwrap();
        let second = client.predictive_search("ru", 6, &[]).await.unwrap();
        assert_eq!(first.queries.len(), 1);
        assert_eq!(second.queries.len(), 1);
        server.verify().await;
    }
}

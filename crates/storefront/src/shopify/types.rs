//! Domain types for Shopify Storefront API.
//!
//! These types provide a clean API for handlers and templates, separate from
//! the wire types in `storefront::queries`.

use aula_core::Price;
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Format for display (e.g., `$19.99`).
    ///
    /// Falls back to `"{amount} {currency_code}"` when the API sends a value
    /// that does not parse.
    #[must_use]
    pub fn display(&self) -> String {
        Price::parse(&self.amount, &self.currency_code).map_or_else(
            |_| format!("{} {}", self.amount, self.currency_code),
            |price| price.display(),
        )
    }
}

/// Price range for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
}

// =============================================================================
// Image Types
// =============================================================================

/// Product, collection or article image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Shopify image ID.
    pub id: Option<String>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

impl Image {
    /// Alt text, falling back to the given title.
    #[must_use]
    pub fn alt_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.alt_text.as_deref().unwrap_or(fallback)
    }
}

// =============================================================================
// SEO Types
// =============================================================================

/// SEO metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seo {
    /// Page title for search engines.
    pub title: Option<String>,
    /// Meta description.
    pub description: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// A product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// Current price.
    pub price: Money,
    /// Variant image.
    pub image: Option<Image>,
}

/// A product (a course, in this catalogue).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Vendor name.
    pub vendor: Option<String>,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// SEO metadata.
    pub seo: Option<Seo>,
    /// Price range across variants.
    pub price_range: Option<PriceRange>,
    /// Product images.
    pub images: Vec<Image>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
    /// Search attribution parameters, present on search results.
    pub tracking_parameters: Option<String>,
}

impl Product {
    /// First product image, else the first variant image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&Image> {
        self.images
            .first()
            .or_else(|| self.variants.first().and_then(|v| v.image.as_ref()))
    }

    /// Lowest price, else the first variant price.
    #[must_use]
    pub fn price(&self) -> Option<&Money> {
        self.price_range
            .as_ref()
            .map(|r| &r.min_variant_price)
            .or_else(|| self.variants.first().map(|v| &v.price))
    }

    /// Storefront path for this product.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/products/{}", self.handle)
    }
}

// =============================================================================
// Collection Types
// =============================================================================

/// A collection of products (a course category).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// SEO metadata.
    pub seo: Option<Seo>,
    /// Collection image.
    pub image: Option<Image>,
    /// Products in this collection.
    pub products: Vec<Product>,
    /// Search attribution parameters, present on search results.
    pub tracking_parameters: Option<String>,
}

impl Collection {
    /// Storefront path for this collection.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/collections/{}", self.handle)
    }
}

// =============================================================================
// Content Types
// =============================================================================

/// A CMS page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Page title.
    pub title: String,
    /// HTML body.
    pub body: String,
    /// SEO metadata.
    pub seo: Option<Seo>,
    /// Search attribution parameters, present on search results.
    pub tracking_parameters: Option<String>,
}

impl Page {
    /// Storefront path for this page.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/pages/{}", self.handle)
    }
}

/// A blog article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Article ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Article title.
    pub title: String,
    /// Handle of the blog the article belongs to.
    pub blog_handle: String,
    /// Title of the blog, when fetched.
    pub blog_title: Option<String>,
    /// HTML content.
    pub content_html: String,
    /// Publication timestamp (ISO 8601).
    pub published_at: Option<String>,
    /// Author display name.
    pub author_name: Option<String>,
    /// Article image.
    pub image: Option<Image>,
    /// SEO metadata.
    pub seo: Option<Seo>,
    /// Search attribution parameters, present on search results.
    pub tracking_parameters: Option<String>,
}

impl Article {
    /// Storefront path for this article.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/blogs/{}/{}", self.blog_handle, self.handle)
    }

    /// Publication date formatted for display (e.g., `March 4, 2026`).
    #[must_use]
    pub fn published_on(&self) -> Option<String> {
        let published_at = self.published_at.as_deref()?;
        chrono::DateTime::parse_from_rfc3339(published_at)
            .ok()
            .map(|dt| dt.format("%B %-d, %Y").to_string())
    }
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// Paginated list of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductConnection {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Search Types
// =============================================================================

/// Results of a full search, grouped by resource type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching products, paginated.
    pub products: ProductConnection,
    /// Matching CMS pages.
    pub pages: Vec<Page>,
    /// Matching blog articles.
    pub articles: Vec<Article>,
    /// Sum of result counts across all groups.
    pub total_results: usize,
}

impl SearchResults {
    /// Whether every group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_results == 0
    }
}

/// A query suggestion from predictive search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySuggestion {
    /// Suggested search text.
    pub text: String,
    /// Suggested text with the matched part wrapped in `<b>`.
    pub styled_text: String,
    /// Search attribution parameters.
    pub tracking_parameters: Option<String>,
}

/// Raw predictive search results, one list per resource type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictiveSearchResult {
    /// Query suggestions.
    pub queries: Vec<QuerySuggestion>,
    /// Matching products.
    pub products: Vec<Product>,
    /// Matching collections.
    pub collections: Vec<Collection>,
    /// Matching CMS pages.
    pub pages: Vec<Page>,
    /// Matching blog articles.
    pub articles: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(amount: &str, code: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: code.to_string(),
        }
    }

    fn product() -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "rust-101".to_string(),
            title: "Rust 101".to_string(),
            vendor: None,
            description: String::new(),
            description_html: String::new(),
            seo: None,
            price_range: None,
            images: vec![],
            variants: vec![ProductVariant {
                id: "gid://shopify/ProductVariant/1".to_string(),
                title: "Default Title".to_string(),
                price: money("49.0", "USD"),
                image: Some(Image {
                    id: None,
                    url: "https://cdn.shopify.com/v.png".to_string(),
                    alt_text: None,
                    width: None,
                    height: None,
                }),
            }],
            tracking_parameters: None,
        }
    }

    #[test]
    fn test_money_display() {
        assert_eq!(money("19.9", "USD").display(), "$19.90");
    }

    #[test]
    fn test_money_display_unparseable_falls_back() {
        assert_eq!(money("n/a", "USD").display(), "n/a USD");
    }

    #[test]
    fn test_product_falls_back_to_first_variant() {
        let product = product();
        assert_eq!(
            product.primary_image().map(|i| i.url.as_str()),
            Some("https://cdn.shopify.com/v.png")
        );
        assert_eq!(product.price().map(Money::display).as_deref(), Some("$49.00"));
        assert_eq!(product.path(), "/products/rust-101");
    }

    #[test]
    fn test_article_path_and_date() {
        let article = Article {
            id: "gid://shopify/Article/1".to_string(),
            handle: "hello".to_string(),
            title: "Hello".to_string(),
            blog_handle: "news".to_string(),
            blog_title: None,
            content_html: String::new(),
            published_at: Some("2026-03-04T10:00:00Z".to_string()),
            author_name: None,
            image: None,
            seo: None,
            tracking_parameters: None,
        };
        assert_eq!(article.path(), "/blogs/news/hello");
        assert_eq!(article.published_on().as_deref(), Some("March 4, 2026"));
    }
}

//! GraphQL operations for the Shopify Storefront API.
//!
//! Each operation is a marker type implementing [`GraphQLQuery`] plus a
//! snake_case module holding its `Variables` and `ResponseData`, the same
//! shape `#[derive(GraphQLQuery)]` generates. Documents live under
//! `graphql/storefront/queries/` and the wire types below only select the
//! fields those documents ask for.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::Deserialize;

macro_rules! storefront_query {
    ($name:ident, $module:ident, $file:literal) => {
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: include_str!(concat!("../../../graphql/storefront/queries/", $file)),
                    operation_name: stringify!($name),
                }
            }
        }
    };
}

storefront_query!(FeaturedCollections, featured_collections, "featured_collections.graphql");
storefront_query!(RecommendedProducts, recommended_products, "recommended_products.graphql");
storefront_query!(Search, search, "search.graphql");
storefront_query!(PredictiveSearch, predictive_search, "predictive_search.graphql");
storefront_query!(CollectionByHandle, collection_by_handle, "collection_by_handle.graphql");
storefront_query!(ProductByHandle, product_by_handle, "product_by_handle.graphql");
storefront_query!(PageByHandle, page_by_handle, "page_by_handle.graphql");
storefront_query!(ArticleByHandle, article_by_handle, "article_by_handle.graphql");

// =============================================================================
// Shared selections
// =============================================================================

/// A `{ nodes { ... } }` connection selection.
#[derive(Debug, Clone, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyFields {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeFields {
    pub min_variant_price: MoneyFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeoFields {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoFields {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandleFields {
    pub handle: String,
}

/// Product card selection shared by the homepage and collection pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardFields {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub price_range: PriceRangeFields,
    #[serde(default)]
    pub images: Nodes<ImageFields>,
}

// =============================================================================
// Operations
// =============================================================================

pub mod featured_collections {
    use serde::{Deserialize, Serialize};

    use super::{ImageFields, Nodes};

    #[derive(Debug, Clone, Default, Serialize)]
    pub struct Variables {
        pub country: Option<String>,
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Nodes<FeaturedCollection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct FeaturedCollection {
        pub id: String,
        pub title: String,
        pub handle: String,
        pub image: Option<ImageFields>,
    }
}

pub mod recommended_products {
    use serde::{Deserialize, Serialize};

    use super::{Nodes, ProductCardFields};

    #[derive(Debug, Clone, Default, Serialize)]
    pub struct Variables {
        pub country: Option<String>,
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Nodes<ProductCardFields>,
    }
}

pub mod search {
    use serde::{Deserialize, Serialize};

    use super::{HandleFields, ImageFields, MoneyFields, Nodes, PageInfoFields};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub term: String,
        pub first: Option<i64>,
        pub last: Option<i64>,
        pub start_cursor: Option<String>,
        pub end_cursor: Option<String>,
        pub country: Option<String>,
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: ProductSearchConnection,
        pub pages: Nodes<SearchResultItem>,
        pub articles: Nodes<SearchResultItem>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductSearchConnection {
        pub nodes: Vec<SearchResultItem>,
        pub page_info: PageInfoFields,
    }

    /// `SearchResultItem` union member, discriminated by `__typename`.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(tag = "__typename")]
    pub enum SearchResultItem {
        Product(SearchProduct),
        Page(SearchPage),
        Article(SearchArticle),
    }

    impl SearchResultItem {
        pub const fn typename(&self) -> &'static str {
            match self {
                Self::Product(_) => "Product",
                Self::Page(_) => "Page",
                Self::Article(_) => "Article",
            }
        }
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SearchProduct {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub tracking_parameters: Option<String>,
        pub vendor: Option<String>,
        #[serde(default)]
        pub variants: Nodes<SearchVariant>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SearchVariant {
        pub id: String,
        pub title: String,
        pub image: Option<ImageFields>,
        pub price: MoneyFields,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SearchPage {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub tracking_parameters: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SearchArticle {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub tracking_parameters: Option<String>,
        pub blog: HandleFields,
    }
}

pub mod predictive_search {
    use aula_core::SearchType;
    use serde::{Deserialize, Serialize};

    use super::{HandleFields, ImageFields, MoneyFields, Nodes};

    /// Only per-type limits are requested.
    #[derive(Debug, Clone, Copy, Serialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum PredictiveSearchLimitScope {
        Each,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub limit: i64,
        pub limit_scope: PredictiveSearchLimitScope,
        pub search_term: String,
        pub types: Option<Vec<SearchType>>,
        pub country: Option<String>,
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub predictive_search: Option<PredictiveSearchResult>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct PredictiveSearchResult {
        #[serde(default)]
        pub articles: Vec<PredictiveArticle>,
        #[serde(default)]
        pub collections: Vec<PredictiveCollection>,
        #[serde(default)]
        pub pages: Vec<PredictivePage>,
        #[serde(default)]
        pub products: Vec<PredictiveProduct>,
        #[serde(default)]
        pub queries: Vec<PredictiveQuery>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PredictiveArticle {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub tracking_parameters: Option<String>,
        pub blog: HandleFields,
        pub image: Option<ImageFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PredictiveCollection {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub tracking_parameters: Option<String>,
        pub image: Option<ImageFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PredictivePage {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub tracking_parameters: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PredictiveProduct {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub tracking_parameters: Option<String>,
        #[serde(default)]
        pub variants: Nodes<PredictiveVariant>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PredictiveVariant {
        pub id: String,
        pub image: Option<ImageFields>,
        pub price: MoneyFields,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PredictiveQuery {
        pub tracking_parameters: Option<String>,
        pub text: String,
        pub styled_text: String,
    }
}

pub mod collection_by_handle {
    use serde::{Deserialize, Serialize};

    use super::{ImageFields, Nodes, ProductCardFields, SeoFields};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
        pub first: Option<i64>,
        pub country: Option<String>,
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CollectionFields {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub description: String,
        pub description_html: String,
        pub seo: Option<SeoFields>,
        pub image: Option<ImageFields>,
        #[serde(default)]
        pub products: Nodes<ProductCardFields>,
    }
}

pub mod product_by_handle {
    use serde::{Deserialize, Serialize};

    use super::{ImageFields, MoneyFields, Nodes, PriceRangeFields, SeoFields};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
        pub country: Option<String>,
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductFields {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub vendor: Option<String>,
        pub description: String,
        pub description_html: String,
        pub seo: Option<SeoFields>,
        pub price_range: PriceRangeFields,
        #[serde(default)]
        pub images: Nodes<ImageFields>,
        #[serde(default)]
        pub variants: Nodes<VariantFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantFields {
        pub id: String,
        pub title: String,
        pub price: MoneyFields,
        pub image: Option<ImageFields>,
    }
}

pub mod page_by_handle {
    use serde::{Deserialize, Serialize};

    use super::SeoFields;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
        pub country: Option<String>,
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub page: Option<PageFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PageFields {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub body: String,
        pub seo: Option<SeoFields>,
    }
}

pub mod article_by_handle {
    use serde::{Deserialize, Serialize};

    use super::{ImageFields, SeoFields};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub blog_handle: String,
        pub article_handle: String,
        pub country: Option<String>,
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub blog: Option<BlogFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BlogFields {
        pub handle: String,
        pub title: String,
        pub article_by_handle: Option<ArticleFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ArticleFields {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub content_html: String,
        pub published_at: Option<String>,
        pub author: Option<AuthorFields>,
        pub image: Option<ImageFields>,
        pub seo: Option<SeoFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AuthorFields {
        pub name: String,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_uses_operation_name_and_document() {
        let body = FeaturedCollections::build_query(featured_collections::Variables::default());
        assert_eq!(body.operation_name, "FeaturedCollections");
        assert!(body.query.contains("query FeaturedCollections("));
        assert!(body.query.contains("@inContext"));
    }

    #[test]
    fn test_every_document_declares_its_operation() {
        let documents = [
            (RecommendedProducts::build_query(recommended_products::Variables::default()).query, "RecommendedProducts"),
            (include_str!("../../../graphql/storefront/queries/search.graphql"), "Search"),
            (include_str!("../../../graphql/storefront/queries/predictive_search.graphql"), "PredictiveSearch"),
            (include_str!("../../../graphql/storefront/queries/collection_by_handle.graphql"), "CollectionByHandle"),
            (include_str!("../../../graphql/storefront/queries/product_by_handle.graphql"), "ProductByHandle"),
            (include_str!("../../../graphql/storefront/queries/page_by_handle.graphql"), "PageByHandle"),
            (include_str!("../../../graphql/storefront/queries/article_by_handle.graphql"), "ArticleByHandle"),
        ];
        for (document, operation) in documents {
            assert!(
                document.contains(&format!("query {operation}(")),
                "{operation} missing from its document"
            );
        }
    }

    #[test]
    fn test_search_variables_use_graphql_names() {
        let variables = search::Variables {
            term: "rust".to_string(),
            first: Some(8),
            last: None,
            start_cursor: None,
            end_cursor: Some("c1".to_string()),
            country: None,
            language: None,
        };
        let json = serde_json::to_value(&variables).unwrap();
        assert_eq!(json["term"], "rust");
        assert_eq!(json["endCursor"], "c1");
        assert!(json["startCursor"].is_null());
    }

    #[test]
    fn test_predictive_variables_serialize_enums() {
        let variables = predictive_search::Variables {
            limit: 6,
            limit_scope: predictive_search::PredictiveSearchLimitScope::Each,
            search_term: "cur".to_string(),
            types: Some(vec![aula_core::SearchType::Product, aula_core::SearchType::Query]),
            country: Some("CL".to_string()),
            language: None,
        };
        let json = serde_json::to_value(&variables).unwrap();
        assert_eq!(json["limitScope"], "EACH");
        assert_eq!(json["searchTerm"], "cur");
        assert_eq!(json["types"], serde_json::json!(["PRODUCT", "QUERY"]));
        assert_eq!(json["country"], "CL");
    }

    #[test]
    fn test_search_result_item_discriminates_on_typename() {
        let json = serde_json::json!({
            "__typename": "Article",
            "id": "gid://shopify/Article/1",
            "handle": "intro",
            "title": "Intro",
            "trackingParameters": null,
            "blog": { "handle": "news" }
        });
        let item: search::SearchResultItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.typename(), "Article");
        assert!(matches!(item, search::SearchResultItem::Article(a) if a.blog.handle == "news"));
    }
}

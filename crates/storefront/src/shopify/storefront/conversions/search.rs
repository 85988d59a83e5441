//! Search and predictive search conversion functions.

use crate::shopify::types::{
    Article, Collection, Page, PredictiveSearchResult, PriceRange, Product, ProductConnection,
    ProductVariant, QuerySuggestion, SearchResults,
};

use super::super::queries::predictive_search::{
    PredictiveArticle, PredictiveCollection, PredictivePage, PredictiveProduct,
    PredictiveSearchResult as WirePredictiveResult,
};
use super::super::queries::search::{
    self, SearchArticle, SearchPage, SearchProduct, SearchResultItem,
};
use super::{convert_image, convert_money, convert_page_info};

// =============================================================================
// Search conversions
// =============================================================================

/// Convert a `Search` response into grouped results.
///
/// Each group is placed by the `__typename` of its first node, so a group
/// lands where its contents say it belongs regardless of which alias
/// returned it. Empty groups are skipped. `total_results` counts every node.
pub fn convert_search(data: search::ResponseData) -> SearchResults {
    let mut results = SearchResults {
        products: ProductConnection {
            products: vec![],
            page_info: convert_page_info(data.products.page_info),
        },
        ..SearchResults::default()
    };

    for nodes in [data.products.nodes, data.pages.nodes, data.articles.nodes] {
        results.total_results += nodes.len();

        let Some(first) = nodes.first() else {
            continue;
        };
        match first.typename() {
            "Product" => results
                .products
                .products
                .extend(nodes.into_iter().filter_map(|n| match n {
                    SearchResultItem::Product(p) => Some(convert_search_product(p)),
                    _ => None,
                })),
            "Page" => results
                .pages
                .extend(nodes.into_iter().filter_map(|n| match n {
                    SearchResultItem::Page(p) => Some(convert_search_page(p)),
                    _ => None,
                })),
            _ => results
                .articles
                .extend(nodes.into_iter().filter_map(|n| match n {
                    SearchResultItem::Article(a) => Some(convert_search_article(a)),
                    _ => None,
                })),
        }
    }

    results
}

fn convert_search_product(product: SearchProduct) -> Product {
    let variants: Vec<ProductVariant> = product
        .variants
        .nodes
        .into_iter()
        .map(|v| ProductVariant {
            id: v.id,
            title: v.title,
            price: convert_money(v.price),
            image: v.image.map(convert_image),
        })
        .collect();

    Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        vendor: product.vendor,
        description: String::new(),
        description_html: String::new(),
        seo: None,
        price_range: variants.first().map(|v| PriceRange {
            min_variant_price: v.price.clone(),
        }),
        images: vec![],
        variants,
        tracking_parameters: product.tracking_parameters,
    }
}

fn convert_search_page(page: SearchPage) -> Page {
    Page {
        id: page.id,
        handle: page.handle,
        title: page.title,
        body: String::new(),
        seo: None,
        tracking_parameters: page.tracking_parameters,
    }
}

fn convert_search_article(article: SearchArticle) -> Article {
    Article {
        id: article.id,
        handle: article.handle,
        title: article.title,
        blog_handle: article.blog.handle,
        blog_title: None,
        content_html: String::new(),
        published_at: None,
        author_name: None,
        image: None,
        seo: None,
        tracking_parameters: article.tracking_parameters,
    }
}

// =============================================================================
// Predictive search conversions
// =============================================================================

pub fn convert_predictive_search(result: WirePredictiveResult) -> PredictiveSearchResult {
    PredictiveSearchResult {
        queries: result
            .queries
            .into_iter()
            .map(|q| QuerySuggestion {
                text: q.text,
                styled_text: q.styled_text,
                tracking_parameters: q.tracking_parameters,
            })
            .collect(),
        products: result
            .products
            .into_iter()
            .map(convert_predictive_product)
            .collect(),
        collections: result
            .collections
            .into_iter()
            .map(convert_predictive_collection)
            .collect(),
        pages: result
            .pages
            .into_iter()
            .map(convert_predictive_page)
            .collect(),
        articles: result
            .articles
            .into_iter()
            .map(convert_predictive_article)
            .collect(),
    }
}

fn convert_predictive_product(product: PredictiveProduct) -> Product {
    Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        vendor: None,
        description: String::new(),
        description_html: String::new(),
        seo: None,
        price_range: None,
        images: vec![],
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(|v| ProductVariant {
                id: v.id,
                title: String::new(),
                price: convert_money(v.price),
                image: v.image.map(convert_image),
            })
            .collect(),
        tracking_parameters: product.tracking_parameters,
    }
}

fn convert_predictive_collection(collection: PredictiveCollection) -> Collection {
    Collection {
        id: collection.id,
        handle: collection.handle,
        title: collection.title,
        description: String::new(),
        description_html: String::new(),
        seo: None,
        image: collection.image.map(convert_image),
        products: vec![],
        tracking_parameters: collection.tracking_parameters,
    }
}

fn convert_predictive_page(page: PredictivePage) -> Page {
    Page {
        id: page.id,
        handle: page.handle,
        title: page.title,
        body: String::new(),
        seo: None,
        tracking_parameters: page.tracking_parameters,
    }
}

fn convert_predictive_article(article: PredictiveArticle) -> Article {
    Article {
        id: article.id,
        handle: article.handle,
        title: article.title,
        blog_handle: article.blog.handle,
        blog_title: None,
        content_html: String::new(),
        published_at: None,
        author_name: None,
        image: article.image.map(convert_image),
        seo: None,
        tracking_parameters: article.tracking_parameters,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product_node(handle: &str) -> serde_json::Value {
        json!({
            "__typename": "Product",
            "id": format!("gid://shopify/Product/{handle}"),
            "handle": handle,
            "title": handle.to_uppercase(),
            "trackingParameters": "_pos=1&_sid=abc&_ss=r",
            "vendor": "Aula",
            "variants": { "nodes": [{
                "id": "gid://shopify/ProductVariant/1",
                "title": "Default Title",
                "image": null,
                "price": { "amount": "25.0", "currencyCode": "USD" }
            }]}
        })
    }

    fn page_info() -> serde_json::Value {
        json!({
            "hasNextPage": true,
            "hasPreviousPage": false,
            "startCursor": "s1",
            "endCursor": "e1"
        })
    }

    #[test]
    fn test_convert_search_groups_by_typename() {
        let data: search::ResponseData = serde_json::from_value(json!({
            "products": { "nodes": [product_node("rust"), product_node("go")], "pageInfo": page_info() },
            "pages": { "nodes": [{
                "__typename": "Page", "id": "p1", "handle": "about", "title": "About",
                "trackingParameters": null
            }]},
            "articles": { "nodes": [{
                "__typename": "Article", "id": "a1", "handle": "launch", "title": "Launch",
                "trackingParameters": null, "blog": { "handle": "news" }
            }]}
        }))
        .unwrap();

        let results = convert_search(data);
        assert_eq!(results.total_results, 4);
        assert_eq!(results.products.products.len(), 2);
        assert_eq!(results.pages[0].handle, "about");
        assert_eq!(results.articles[0].path(), "/blogs/news/launch");
        assert_eq!(results.products.page_info.end_cursor.as_deref(), Some("e1"));
        assert_eq!(
            results.products.products[0].price().map(|m| m.display()).as_deref(),
            Some("$25.00")
        );
    }

    #[test]
    fn test_convert_search_places_group_by_first_node() {
        // An alias returning pages still lands in the pages group
        let data: search::ResponseData = serde_json::from_value(json!({
            "products": { "nodes": [], "pageInfo": page_info() },
            "pages": { "nodes": [] },
            "articles": { "nodes": [{
                "__typename": "Page", "id": "p1", "handle": "faq", "title": "FAQ",
                "trackingParameters": null
            }]}
        }))
        .unwrap();

        let results = convert_search(data);
        assert_eq!(results.total_results, 1);
        assert!(results.articles.is_empty());
        assert_eq!(results.pages[0].handle, "faq");
    }

    #[test]
    fn test_convert_search_empty() {
        let data: search::ResponseData = serde_json::from_value(json!({
            "products": { "nodes": [], "pageInfo": page_info() },
            "pages": { "nodes": [] },
            "articles": { "nodes": [] }
        }))
        .unwrap();

        let results = convert_search(data);
        assert!(results.is_empty());
    }

    #[test]
    fn test_convert_predictive_search() {
        let wire: WirePredictiveResult = serde_json::from_value(json!({
            "queries": [{ "__typename": "SearchQuerySuggestion", "text": "rust", "styledText": "<b>ru</b>st", "trackingParameters": "t=1" }],
            "products": [{
                "__typename": "Product", "id": "p1", "handle": "rust-101", "title": "Rust 101",
                "trackingParameters": null,
                "variants": { "nodes": [{
                    "id": "v1",
                    "image": { "url": "https://cdn.shopify.com/a.png", "altText": null, "width": 10, "height": 10 },
                    "price": { "amount": "10.0", "currencyCode": "EUR" }
                }]}
            }],
            "collections": [],
            "pages": [],
            "articles": []
        }))
        .unwrap();

        let result = convert_predictive_search(wire);
        assert_eq!(result.queries[0].styled_text, "<b>ru</b>st");
        assert_eq!(
            result.products[0].primary_image().map(|i| i.url.as_str()),
            Some("https://cdn.shopify.com/a.png")
        );
        assert!(result.collections.is_empty());
    }
}

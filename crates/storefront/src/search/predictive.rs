//! Predictive search normalisation.
//!
//! The API returns one list per resource type with type-specific shapes.
//! [`normalize`] flattens them into uniform items grouped in display order,
//! each with a ready-to-use link.

use aula_core::SearchType;
use serde::Serialize;

use crate::shopify::{Image, Money, PredictiveSearchResult};

use super::apply_tracking_params;

/// Default items per resource type.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on items per resource type.
pub const MAX_LIMIT: i64 = 10;

/// Parse the `limit` query parameter.
///
/// Missing or malformed values use [`DEFAULT_LIMIT`]; the rest are clamped
/// to `1..=MAX_LIMIT`.
#[must_use]
pub fn parse_limit(limit: Option<&str>) -> i64 {
    limit
        .and_then(|l| l.trim().parse::<i64>().ok())
        .map_or(DEFAULT_LIMIT, |l| l.clamp(1, MAX_LIMIT))
}

/// One result row.
#[derive(Debug, Clone, Serialize)]
pub struct PredictiveSearchItem {
    /// API type name of the source resource.
    pub typename: &'static str,
    /// Resource id, or `query-suggestion-{index}` for suggestions.
    pub id: String,
    /// Resource handle (empty for suggestions).
    pub handle: String,
    /// Plain title.
    pub title: String,
    /// Title with the match highlighted (suggestions only).
    pub styled_title: Option<String>,
    /// Link target, including tracking parameters.
    pub url: String,
    /// Thumbnail.
    pub image: Option<Image>,
    /// Price (products only).
    pub price: Option<Money>,
}

/// Results for one resource type.
#[derive(Debug, Clone, Serialize)]
pub struct PredictiveSearchGroup {
    pub kind: SearchType,
    pub items: Vec<PredictiveSearchItem>,
}

impl PredictiveSearchGroup {
    /// Group heading shown above the items.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self.kind {
            SearchType::Query => "Suggestions",
            other => other.plural(),
        }
    }

    /// Full search page restricted to this group's type.
    #[must_use]
    pub fn category_url(&self, term: &str) -> String {
        format!(
            "/search?q={}&type={}",
            urlencoding::encode(term),
            aula_core::plural_to_singular(&[self.kind.plural()])
        )
    }
}

/// Normalised predictive search results.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedPredictiveSearch {
    /// Non-empty groups in display order.
    pub results: Vec<PredictiveSearchGroup>,
    /// Item count across all groups.
    pub total_results: usize,
}

impl NormalizedPredictiveSearch {
    /// Every group present with no items.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            results: SearchType::PREDICTIVE_ORDER
                .into_iter()
                .map(|kind| PredictiveSearchGroup {
                    kind,
                    items: vec![],
                })
                .collect(),
            total_results: 0,
        }
    }

    /// Whether no group has items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_results == 0
    }
}

/// Normalise raw predictive search results.
///
/// Groups follow [`SearchType::PREDICTIVE_ORDER`]; a group is only emitted
/// when it has items.
#[must_use]
pub fn normalize(result: PredictiveSearchResult) -> NormalizedPredictiveSearch {
    let PredictiveSearchResult {
        queries,
        products,
        collections,
        pages,
        articles,
    } = result;

    let mut groups = Vec::with_capacity(SearchType::PREDICTIVE_ORDER.len());

    let query_items: Vec<_> = queries
        .into_iter()
        .enumerate()
        .map(|(index, query)| {
            let params = format!("q={}", urlencoding::encode(&query.text));
            PredictiveSearchItem {
                typename: "SearchQuerySuggestion",
                id: format!("query-suggestion-{index}"),
                handle: String::new(),
                url: format!(
                    "/search{}",
                    apply_tracking_params(query.tracking_parameters.as_deref(), Some(&params))
                ),
                title: query.text,
                styled_title: Some(query.styled_text),
                image: None,
                price: None,
            }
        })
        .collect();
    push_group(&mut groups, SearchType::Query, query_items);

    let product_items: Vec<_> = products
        .into_iter()
        .map(|product| {
            let variant = product.variants.into_iter().next();
            PredictiveSearchItem {
                typename: "Product",
                url: format!(
                    "/products/{}{}",
                    product.handle,
                    apply_tracking_params(product.tracking_parameters.as_deref(), None)
                ),
                id: product.id,
                handle: product.handle,
                title: product.title,
                styled_title: None,
                image: variant.as_ref().and_then(|v| v.image.clone()),
                price: variant.map(|v| v.price),
            }
        })
        .collect();
    push_group(&mut groups, SearchType::Product, product_items);

    let collection_items: Vec<_> = collections
        .into_iter()
        .map(|collection| PredictiveSearchItem {
            typename: "Collection",
            url: format!(
                "/collections/{}{}",
                collection.handle,
                apply_tracking_params(collection.tracking_parameters.as_deref(), None)
            ),
            id: collection.id,
            handle: collection.handle,
            title: collection.title,
            styled_title: None,
            image: collection.image,
            price: None,
        })
        .collect();
    push_group(&mut groups, SearchType::Collection, collection_items);

    let page_items: Vec<_> = pages
        .into_iter()
        .map(|page| PredictiveSearchItem {
            typename: "Page",
            url: format!(
                "/pages/{}{}",
                page.handle,
                apply_tracking_params(page.tracking_parameters.as_deref(), None)
            ),
            id: page.id,
            handle: page.handle,
            title: page.title,
            styled_title: None,
            image: None,
            price: None,
        })
        .collect();
    push_group(&mut groups, SearchType::Page, page_items);

    let article_items: Vec<_> = articles
        .into_iter()
        .map(|article| PredictiveSearchItem {
            typename: "Article",
            url: format!(
                "{}{}",
                article.path(),
                apply_tracking_params(article.tracking_parameters.as_deref(), None)
            ),
            id: article.id,
            handle: article.handle,
            title: article.title,
            styled_title: None,
            image: article.image,
            price: None,
        })
        .collect();
    push_group(&mut groups, SearchType::Article, article_items);

    let total_results = groups.iter().map(|g| g.items.len()).sum();
    NormalizedPredictiveSearch {
        results: groups,
        total_results,
    }
}

fn push_group(
    groups: &mut Vec<PredictiveSearchGroup>,
    kind: SearchType,
    items: Vec<PredictiveSearchItem>,
) {
    if !items.is_empty() {
        groups.push(PredictiveSearchGroup { kind, items });
    }
}

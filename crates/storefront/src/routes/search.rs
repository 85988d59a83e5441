//! Search route handlers.

use askama::Template;
use askama_web::WebTemplate;
use aula_core::{PaginationDirection, PaginationRequest, SearchType};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::search::{
    NormalizedPredictiveSearch, PredictiveSearchGroup, PredictiveSearchItem, SEARCH_PAGE_SIZE,
    apply_tracking_params, normalize, parse_limit, sanitize_styled_title,
};
use crate::shopify::types::{PageInfo, SearchResults};
use crate::state::AppState;

use super::products::{ImageView, ProductView};

// =============================================================================
// Query Parameters
// =============================================================================

/// Full search page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPageQuery {
    #[serde(default)]
    pub q: String,
    /// Comma separated singular types restricting which groups render.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub cursor: Option<String>,
    pub direction: Option<String>,
}

/// Predictive search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PredictiveQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// =============================================================================
// Views
// =============================================================================

/// A titled link in the pages or articles group.
#[derive(Clone, Debug)]
pub struct ResultLinkView {
    pub title: String,
    pub url: String,
}

/// Result groups the search page has sections for.
const RENDERED_TYPES: [SearchType; 3] =
    [SearchType::Product, SearchType::Page, SearchType::Article];

/// Search results prepared for the search page.
pub struct SearchResultsView {
    pub products: Vec<ProductView>,
    pub pages: Vec<ResultLinkView>,
    pub articles: Vec<ResultLinkView>,
    /// Results across the groups shown.
    pub total_results: usize,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
}

impl SearchResultsView {
    /// Shape results for display, keeping only the groups in `types`.
    ///
    /// Types without a group on this page are ignored. When none remain,
    /// every group is kept.
    #[must_use]
    pub fn new(results: SearchResults, term: &str, types: &[SearchType]) -> Self {
        let types: Vec<SearchType> = types
            .iter()
            .copied()
            .filter(|t| RENDERED_TYPES.contains(t))
            .collect();
        let shows = |kind: SearchType| types.is_empty() || types.contains(&kind);
        let params = format!("q={}", urlencoding::encode(term));
        let link = |path: String, tracking: Option<&str>| {
            format!("{path}{}", apply_tracking_params(tracking, Some(&params)))
        };

        let SearchResults {
            products,
            pages,
            articles,
            ..
        } = results;

        let (products, page_info) = if shows(SearchType::Product) {
            let views = products
                .products
                .iter()
                .map(|p| {
                    ProductView::with_url(p, link(p.path(), p.tracking_parameters.as_deref()))
                })
                .collect();
            (views, products.page_info)
        } else {
            (Vec::new(), PageInfo::default())
        };

        let pages: Vec<_> = if shows(SearchType::Page) {
            pages
                .iter()
                .map(|page| ResultLinkView {
                    title: page.title.clone(),
                    url: link(page.path(), page.tracking_parameters.as_deref()),
                })
                .collect()
        } else {
            Vec::new()
        };

        let articles: Vec<_> = if shows(SearchType::Article) {
            articles
                .iter()
                .map(|article| ResultLinkView {
                    title: article.title.clone(),
                    url: link(article.path(), article.tracking_parameters.as_deref()),
                })
                .collect()
        } else {
            Vec::new()
        };

        let type_param = types
            .iter()
            .map(|t| t.singular())
            .collect::<Vec<_>>()
            .join(",");
        let page_url = |cursor: Option<&String>, direction: PaginationDirection| {
            cursor.map(|cursor| {
                let mut url = format!("/search?{params}");
                if !type_param.is_empty() {
                    url.push_str("&type=");
                    url.push_str(&type_param);
                }
                url.push_str(&format!(
                    "&cursor={}&direction={}",
                    urlencoding::encode(cursor),
                    direction.as_str()
                ));
                url
            })
        };

        Self {
            total_results: products.len() + pages.len() + articles.len(),
            previous_url: page_info
                .has_previous_page
                .then(|| page_url(page_info.start_cursor.as_ref(), PaginationDirection::Previous))
                .flatten(),
            next_url: page_info
                .has_next_page
                .then(|| page_url(page_info.end_cursor.as_ref(), PaginationDirection::Next))
                .flatten(),
            products,
            pages,
            articles,
        }
    }
}

/// One predictive result row.
pub struct PredictiveItemView {
    pub id: String,
    pub title: String,
    /// Sanitised markup; only `<b>` survives.
    pub styled_title_html: Option<String>,
    pub url: String,
    pub image: Option<ImageView>,
    pub price: Option<String>,
}

impl From<PredictiveSearchItem> for PredictiveItemView {
    fn from(item: PredictiveSearchItem) -> Self {
        Self {
            image: item.image.as_ref().map(|img| ImageView::new(img, &item.title)),
            price: item.price.as_ref().map(|m| m.display()),
            styled_title_html: item.styled_title.as_deref().map(sanitize_styled_title),
            id: item.id,
            title: item.title,
            url: item.url,
        }
    }
}

/// One predictive result group.
pub struct PredictiveGroupView {
    pub heading: &'static str,
    /// Full search restricted to this group's type.
    pub url: String,
    pub items: Vec<PredictiveItemView>,
}

impl PredictiveGroupView {
    fn new(group: PredictiveSearchGroup, term: &str) -> Self {
        Self {
            heading: group.heading(),
            url: group.category_url(term),
            items: group.items.into_iter().map(PredictiveItemView::from).collect(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Full search page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search.html")]
pub struct SearchPageTemplate {
    pub shop_name: String,
    pub term: String,
    /// `None` until a term is submitted.
    pub results: Option<SearchResultsView>,
}

/// Predictive search fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/predictive_search.html")]
pub struct PredictiveSearchTemplate {
    pub term: String,
    pub groups: Vec<PredictiveGroupView>,
    pub total_results: usize,
}

impl PredictiveSearchTemplate {
    fn new(term: String, search: NormalizedPredictiveSearch) -> Self {
        Self {
            groups: search
                .results
                .into_iter()
                .filter(|g| !g.items.is_empty())
                .map(|g| PredictiveGroupView::new(g, &term))
                .collect(),
            total_results: search.total_results,
            term,
        }
    }

    /// Link to the full results page for the term.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("/search?q={}", urlencoding::encode(&self.term))
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the full search page.
///
/// # Errors
///
/// Returns an error if the search request fails.
#[instrument(skip(state))]
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchPageQuery>,
) -> Result<impl IntoResponse> {
    let term = query.q.trim().to_string();

    let results = if term.is_empty() {
        None
    } else {
        add_breadcrumb("search", "Searched catalogue", Some(&[("term", term.as_str())]));

        let types = query
            .kind
            .as_deref()
            .map(SearchType::parse_list)
            .unwrap_or_default();
        let pagination = PaginationRequest::from_params(
            query.cursor.as_deref(),
            query.direction.as_deref(),
            SEARCH_PAGE_SIZE,
        );

        let results = state.storefront().search(&term, &pagination).await?;
        Some(SearchResultsView::new(results, &term, &types))
    };

    Ok(SearchPageTemplate {
        shop_name: state.shop_name().to_string(),
        term,
        results,
    })
}

/// Predictive search fragment for the search-as-you-type dropdown.
///
/// Failures degrade to the no-results state.
#[instrument(skip(state))]
pub async fn predictive_search(
    State(state): State<AppState>,
    Query(query): Query<PredictiveQuery>,
) -> impl IntoResponse {
    let term = query.q.trim().to_string();
    if term.is_empty() {
        return PredictiveSearchTemplate::new(term, NormalizedPredictiveSearch::empty());
    }

    let limit = parse_limit(query.limit.as_deref());
    let types = query
        .kind
        .as_deref()
        .map(SearchType::parse_list)
        .unwrap_or_default();

    let search = state
        .storefront()
        .predictive_search(&term, limit, &types)
        .await
        .map_or_else(
            |e| {
                tracing::error!("Predictive search failed: {e}");
                NormalizedPredictiveSearch::empty()
            },
            normalize,
        );

    PredictiveSearchTemplate::new(term, search)
}

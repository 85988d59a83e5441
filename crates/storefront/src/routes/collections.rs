//! Collection route handlers.

use askama::Template;
use askama_web::WebTemplate;
use aula_core::CollectionHandle;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::shopify::types::Collection;
use crate::state::AppState;

pub use super::products::{ImageView, ProductView};

/// Products shown on a collection page.
const PRODUCTS_PER_COLLECTION: i64 = 12;

/// Collection display data for templates.
#[derive(Clone)]
pub struct CollectionView {
    pub handle: String,
    pub title: String,
    pub url: String,
    pub description_html: Option<String>,
    pub image: Option<ImageView>,
}

impl From<&Collection> for CollectionView {
    fn from(collection: &Collection) -> Self {
        Self {
            handle: collection.handle.clone(),
            title: collection.title.clone(),
            url: collection.path(),
            description_html: Some(collection.description_html.clone())
                .filter(|d| !d.trim().is_empty()),
            image: collection
                .image
                .as_ref()
                .map(|img| ImageView::new(img, &collection.title)),
        }
    }
}

/// Collection detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/show.html")]
pub struct CollectionShowTemplate {
    pub shop_name: String,
    pub collection: CollectionView,
    pub products: Vec<ProductView>,
}

/// Display collection detail page.
///
/// # Errors
///
/// Returns 404 for malformed or unknown handles.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let handle = CollectionHandle::parse(&handle)
        .map_err(|e| AppError::NotFound(format!("collection {handle:?}: {e}")))?;

    let collection = state
        .storefront()
        .get_collection_by_handle(&handle, PRODUCTS_PER_COLLECTION)
        .await?;

    Ok(CollectionShowTemplate {
        shop_name: state.shop_name().to_string(),
        collection: CollectionView::from(&collection),
        products: collection.products.iter().map(ProductView::new).collect(),
    })
}

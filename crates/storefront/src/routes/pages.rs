//! CMS page route handler.

use askama::Template;
use askama_web::WebTemplate;
use aula_core::PageHandle;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// CMS page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/page.html")]
pub struct PageTemplate {
    pub shop_name: String,
    pub title: String,
    pub description: Option<String>,
    pub body_html: String,
}

/// Display a CMS page.
///
/// # Errors
///
/// Returns 404 for malformed or unknown handles.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let handle = PageHandle::parse(&handle)
        .map_err(|e| AppError::NotFound(format!("page {handle:?}: {e}")))?;

    let page = state.storefront().get_page_by_handle(&handle).await?;

    Ok(PageTemplate {
        shop_name: state.shop_name().to_string(),
        description: page.seo.and_then(|s| s.description),
        title: page.title,
        body_html: page.body,
    })
}

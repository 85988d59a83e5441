//! Blog article route handler.

use askama::Template;
use askama_web::WebTemplate;
use aula_core::{ArticleHandle, BlogHandle};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

use super::products::ImageView;

/// Article page template.
#[derive(Template, WebTemplate)]
#[template(path = "blogs/article.html")]
pub struct ArticleTemplate {
    pub shop_name: String,
    pub blog_title: String,
    pub title: String,
    pub author: Option<String>,
    pub published_on: Option<String>,
    pub image: Option<ImageView>,
    pub content_html: String,
}

/// Display a blog article.
///
/// # Errors
///
/// Returns 404 for malformed or unknown handles.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((blog, article)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let blog = BlogHandle::parse(&blog)
        .map_err(|e| AppError::NotFound(format!("blog {blog:?}: {e}")))?;
    let article = ArticleHandle::parse(&article)
        .map_err(|e| AppError::NotFound(format!("article {article:?}: {e}")))?;

    let article = state.storefront().get_article(&blog, &article).await?;

    Ok(ArticleTemplate {
        shop_name: state.shop_name().to_string(),
        blog_title: article
            .blog_title
            .clone()
            .unwrap_or_else(|| blog.to_string()),
        published_on: article.published_on(),
        image: article
            .image
            .as_ref()
            .map(|img| ImageView::new(img, &article.title)),
        author: article.author_name,
        title: article.title,
        content_html: article.content_html,
    })
}

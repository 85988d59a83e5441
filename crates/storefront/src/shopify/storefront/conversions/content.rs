//! Page and article conversion functions.

use crate::shopify::types::{Article, Page};

use super::super::queries::{article_by_handle, page_by_handle};
use super::{convert_image, convert_seo};

pub fn convert_page(page: page_by_handle::PageFields) -> Page {
    Page {
        id: page.id,
        handle: page.handle,
        title: page.title,
        body: page.body,
        seo: page.seo.map(convert_seo),
        tracking_parameters: None,
    }
}

pub fn convert_article(
    blog_handle: String,
    blog_title: String,
    article: article_by_handle::ArticleFields,
) -> Article {
    Article {
        id: article.id,
        handle: article.handle,
        title: article.title,
        blog_handle,
        blog_title: Some(blog_title),
        content_html: article.content_html,
        published_at: article.published_at,
        author_name: article.author.map(|a| a.name),
        image: article.image.map(convert_image),
        seo: article.seo.map(convert_seo),
        tracking_parameters: None,
    }
}

//! Request-level errors.
//!
//! Handlers return [`Result`]; [`AppError`] picks the status code, reports
//! server-side failures to Sentry and renders a body that never carries
//! internal details. Not-found responses render the 404 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::filters;
use crate::shopify::ShopifyError;

/// Error returned by route handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The Storefront API call failed.
    #[error("Storefront API: {0}")]
    Shopify(#[from] ShopifyError),

    /// Unknown route, malformed handle or missing resource.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// 404 page.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub shop_name: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Shopify(ShopifyError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Shopify(ShopifyError::RateLimited(_)) => StatusCode::TOO_MANY_REQUESTS,
            Self::Shopify(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        if status == StatusCode::NOT_FOUND {
            let page = NotFoundTemplate {
                shop_name: crate::DEFAULT_SHOP_NAME.to_string(),
            };
            return (status, page).into_response();
        }

        // Don't expose upstream error details to clients
        let message = match &self {
            Self::Shopify(ShopifyError::RateLimited(_)) => "Too many requests",
            _ => "External service error",
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a user action as a Sentry breadcrumb.
///
/// Breadcrumbs show up on any error reported later in the same request.
///
/// ```rust,ignore
/// add_breadcrumb("search", "Searched catalogue", Some(&[("term", "rust")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let data = data
        .unwrap_or_default()
        .iter()
        .map(|&(key, value)| (key.to_string(), serde_json::Value::from(value)))
        .collect();

    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        data,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (
                AppError::from(ShopifyError::NotFound("x".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(ShopifyError::RateLimited(5)),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AppError::from(ShopifyError::GraphQL(vec![])),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected);
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_upstream_details_are_hidden() {
        let err = ShopifyError::GraphQL(vec![crate::shopify::GraphQLError::message(
            "HTTP 401 Unauthorized: invalid token",
        )]);
        let response = AppError::from(err).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(&body[..], b"External service error");

        let response = AppError::from(ShopifyError::RateLimited(2)).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(&body[..], b"Too many requests");
    }

    #[test]
    fn test_not_found_renders_page() {
        let html = NotFoundTemplate {
            shop_name: "Hydrogen".to_string(),
        }
        .render()
        .unwrap_or_else(|e| panic!("{e}"));
        assert!(html.contains("404"));
        assert!(html.contains("href=\"/\""));
    }
}

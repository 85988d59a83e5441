//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Hand-written `graphql_client` operations over `.graphql` documents
//! - Shopify is the only data source; nothing is stored locally
//! - Catalogue reads are cached in memory with `moka` (5 minute TTL)
//! - Search and predictive search always hit the API
//!
//! # Example
//!
//! ```rust,ignore
//! use aula_storefront::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify);
//! let categories = client.get_featured_collections().await?;
//! let suggestions = client.predictive_search("diseño", 6, &[]).await?;
//! ```

mod storefront;
pub mod types;

use std::fmt;

pub use storefront::StorefrontClient;
pub use types::*;

use thiserror::Error;

/// Failure talking to the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with GraphQL errors or a non-success status.
    #[error("GraphQL errors: {}", GraphQLErrors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Shopify throttled the request.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Default)]
pub struct GraphQLError {
    pub message: String,
    /// Response path, e.g. `search.0`.
    pub path: Vec<String>,
    /// First reported `(line, column)` in the document.
    pub location: Option<(i64, i64)>,
}

impl GraphQLError {
    /// Error carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        Self {
            message: e.message,
            path: e
                .path
                .unwrap_or_default()
                .into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(key) => key,
                    graphql_client::PathFragment::Index(index) => index.to_string(),
                })
                .collect(),
            location: e
                .locations
                .and_then(|locations| locations.into_iter().next())
                .map(|l| (i64::from(l.line), i64::from(l.column))),
        }
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if !self.message.is_empty() {
            parts.push(self.message.clone());
        }
        if !self.path.is_empty() {
            parts.push(format!("path: {}", self.path.join(".")));
        }
        if let Some((line, column)) = self.location {
            parts.push(format!("at line {line}:{column}"));
        }

        if parts.is_empty() {
            f.write_str("(no details)")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

/// `Display` adapter joining errors with `; `.
struct GraphQLErrors<'a>(&'a [GraphQLError]);

impl fmt::Display for GraphQLErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(no error details provided)");
        }
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_from_response() {
        let error: graphql_client::Error = serde_json::from_value(serde_json::json!({
            "message": "Field 'x' doesn't exist",
            "locations": [{ "line": 3, "column": 7 }],
            "path": ["search", 0]
        }))
        .unwrap_or_else(|e| panic!("{e}"));
        let err = ShopifyError::GraphQL(vec![GraphQLError::from(error)]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'x' doesn't exist path: search.0 at line 3:7"
        );
    }

    #[test]
    fn test_graphql_errors_joined() {
        let err = ShopifyError::GraphQL(vec![
            GraphQLError::message("Throttled"),
            GraphQLError::message("Invalid handle"),
        ]);
        assert_eq!(err.to_string(), "GraphQL errors: Throttled; Invalid handle");
    }

    #[test]
    fn test_graphql_error_without_details() {
        let err = ShopifyError::GraphQL(vec![GraphQLError::default()]);
        assert_eq!(err.to_string(), "GraphQL errors: (no details)");

        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(err.to_string(), "GraphQL errors: (no error details provided)");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = ShopifyError::RateLimited(2);
        assert_eq!(err.to_string(), "Rate limited, retry after 2 seconds");
    }
}

//! Cursor-based pagination for Storefront API connections.
//!
//! Pages are addressed with a `cursor` and a `direction` query parameter.
//! Moving forward asks for `first: n, after: cursor`; moving backward asks
//! for `last: n, before: cursor`.

use serde::{Deserialize, Serialize};

/// Direction to move through a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaginationDirection {
    /// Towards the end of the connection.
    #[default]
    Next,
    /// Towards the start of the connection.
    Previous,
}

impl PaginationDirection {
    /// Parse the `direction` query parameter.
    ///
    /// Only `previous` pages backwards; anything else (including nothing)
    /// pages forwards.
    #[must_use]
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("previous") => Self::Previous,
            _ => Self::Next,
        }
    }

    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

/// Connection arguments for one page of results.
///
/// Serializes to the GraphQL variable names used by the search queries
/// (`first`, `last`, `startCursor`, `endCursor`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    /// Page size when moving forward.
    pub first: Option<i64>,
    /// Page size when moving backward.
    pub last: Option<i64>,
    /// Cursor to page backward from (`before`).
    pub start_cursor: Option<String>,
    /// Cursor to page forward from (`after`).
    pub end_cursor: Option<String>,
}

impl PaginationRequest {
    /// Build connection arguments from request parameters.
    ///
    /// Empty cursors are treated as absent.
    #[must_use]
    pub fn from_params(cursor: Option<&str>, direction: Option<&str>, page_by: i64) -> Self {
        let cursor = cursor
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string);

        match PaginationDirection::parse(direction) {
            PaginationDirection::Previous => Self {
                first: None,
                last: Some(page_by),
                start_cursor: cursor,
                end_cursor: None,
            },
            PaginationDirection::Next => Self {
                first: Some(page_by),
                last: None,
                start_cursor: None,
                end_cursor: cursor,
            },
        }
    }

    /// First page of a connection.
    #[must_use]
    pub const fn first_page(page_by: i64) -> Self {
        Self {
            first: Some(page_by),
            last: None,
            start_cursor: None,
            end_cursor: None,
        }
    }

    /// Whether this request continues from a cursor.
    #[must_use]
    pub const fn has_cursor(&self) -> bool {
        self.start_cursor.is_some() || self.end_cursor.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cursor_is_first_page() {
        let request = PaginationRequest::from_params(None, None, 8);
        assert_eq!(request, PaginationRequest::first_page(8));
        assert!(!request.has_cursor());
    }

    #[test]
    fn test_next_direction_uses_after() {
        let request = PaginationRequest::from_params(Some("abc"), Some("next"), 8);
        assert_eq!(request.first, Some(8));
        assert_eq!(request.last, None);
        assert_eq!(request.end_cursor.as_deref(), Some("abc"));
        assert_eq!(request.start_cursor, None);
    }

    #[test]
    fn test_previous_direction_uses_before() {
        let request = PaginationRequest::from_params(Some("abc"), Some("previous"), 8);
        assert_eq!(request.first, None);
        assert_eq!(request.last, Some(8));
        assert_eq!(request.start_cursor.as_deref(), Some("abc"));
        assert_eq!(request.end_cursor, None);
    }

    #[test]
    fn test_unknown_direction_pages_forward() {
        let request = PaginationRequest::from_params(Some("abc"), Some("sideways"), 4);
        assert_eq!(request.first, Some(4));
        assert_eq!(request.end_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_blank_cursor_is_ignored() {
        let request = PaginationRequest::from_params(Some("  "), Some("previous"), 8);
        assert_eq!(request.start_cursor, None);
        assert!(!request.has_cursor());
    }

    #[test]
    fn test_serializes_graphql_variable_names() {
        let request = PaginationRequest::from_params(Some("c1"), None, 8);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["first"], 8);
        assert_eq!(json["endCursor"], "c1");
        assert!(json["startCursor"].is_null());
    }
}

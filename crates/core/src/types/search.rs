//! Search resource types.
//!
//! The Storefront API names searchable resources with singular enum values
//! (`PRODUCT`, `ARTICLE`, ...) while grouped results are keyed by plural
//! names (`products`, `articles`, ...). [`SearchType`] maps between the two.

use serde::{Deserialize, Serialize};

/// A searchable resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchType {
    /// Query suggestions.
    Query,
    /// Products.
    Product,
    /// Collections.
    Collection,
    /// CMS pages.
    Page,
    /// Blog articles.
    Article,
}

impl SearchType {
    /// Predictive result groups, in display order.
    pub const PREDICTIVE_ORDER: [Self; 5] = [
        Self::Query,
        Self::Product,
        Self::Collection,
        Self::Page,
        Self::Article,
    ];

    /// Plural group key (e.g. `products`).
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Query => "queries",
            Self::Product => "products",
            Self::Collection => "collections",
            Self::Page => "pages",
            Self::Article => "articles",
        }
    }

    /// Singular API enum value (e.g. `PRODUCT`).
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Product => "PRODUCT",
            Self::Collection => "COLLECTION",
            Self::Page => "PAGE",
            Self::Article => "ARTICLE",
        }
    }

    /// Parse a plural group key.
    #[must_use]
    pub fn from_plural(s: &str) -> Option<Self> {
        Self::PREDICTIVE_ORDER
            .into_iter()
            .find(|t| t.plural() == s)
    }

    /// Parse a singular API value (case-insensitive).
    #[must_use]
    pub fn from_singular(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::PREDICTIVE_ORDER
            .into_iter()
            .find(|t| t.singular() == upper)
    }

    /// Parse a comma separated `type` parameter of singular values.
    ///
    /// Unknown entries and `ANY` are skipped; an empty result means "all
    /// types".
    #[must_use]
    pub fn parse_list(s: &str) -> Vec<Self> {
        let mut types: Vec<Self> = Vec::new();
        for t in s.split(',').filter_map(Self::from_singular) {
            if !types.contains(&t) {
                types.push(t);
            }
        }
        types
    }
}

/// Convert plural group keys to the singular `type` parameter value.
///
/// Unknown keys are dropped.
///
/// ```rust
/// use aula_core::plural_to_singular;
///
/// assert_eq!(plural_to_singular(&["articles"]), "ARTICLE");
/// assert_eq!(plural_to_singular(&["articles", "products"]), "ARTICLE,PRODUCT");
/// ```
#[must_use]
pub fn plural_to_singular(types: &[&str]) -> String {
    types
        .iter()
        .filter_map(|t| SearchType::from_plural(t))
        .map(SearchType::singular)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_to_singular_single() {
        assert_eq!(plural_to_singular(&["articles"]), "ARTICLE");
        assert_eq!(plural_to_singular(&["queries"]), "QUERY");
        assert_eq!(plural_to_singular(&["collections"]), "COLLECTION");
    }

    #[test]
    fn test_plural_to_singular_list() {
        assert_eq!(
            plural_to_singular(&["articles", "products"]),
            "ARTICLE,PRODUCT"
        );
    }

    #[test]
    fn test_plural_to_singular_drops_unknown() {
        assert_eq!(plural_to_singular(&["widgets", "pages"]), "PAGE");
        assert_eq!(plural_to_singular(&[]), "");
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            SearchType::parse_list("PRODUCT,article"),
            vec![SearchType::Product, SearchType::Article]
        );
        assert!(SearchType::parse_list("ANY").is_empty());
        assert!(SearchType::parse_list("").is_empty());
        assert_eq!(
            SearchType::parse_list("PAGE,PAGE"),
            vec![SearchType::Page]
        );
    }

    #[test]
    fn test_predictive_order() {
        let keys: Vec<_> = SearchType::PREDICTIVE_ORDER
            .iter()
            .map(|t| t.plural())
            .collect();
        assert_eq!(
            keys,
            vec!["queries", "products", "collections", "pages", "articles"]
        );
    }
}

//! Search helpers shared by the search page and predictive search.
//!
//! - [`tracking`]: attribution parameters on result links
//! - [`predictive`]: normalisation of type-ahead results
//! - [`sanitize_styled_title`]: highlighted suggestion markup

pub mod predictive;
pub mod tracking;

pub use predictive::{
    NormalizedPredictiveSearch, PredictiveSearchGroup, PredictiveSearchItem, normalize,
    parse_limit,
};
pub use tracking::apply_tracking_params;

/// Products per search results page.
pub const SEARCH_PAGE_SIZE: i64 = 8;

/// Escape a styled suggestion title, keeping only balanced `<b>` highlighting.
///
/// A `</b>` with no open `<b>` is escaped, and open tags are closed at the
/// end, so highlighting never reaches the surrounding markup.
///
/// ```rust
/// use aula_storefront::search::sanitize_styled_title;
///
/// assert_eq!(sanitize_styled_title("<b>ru</b>st"), "<b>ru</b>st");
/// assert_eq!(
///     sanitize_styled_title("<i>x</i>"),
///     "&lt;i&gt;x&lt;/i&gt;"
/// );
/// ```
#[must_use]
pub fn sanitize_styled_title(styled: &str) -> String {
    let mut sanitized = String::with_capacity(styled.len());
    let mut open = 0usize;
    let mut rest = styled;

    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("<b>") {
            sanitized.push_str("<b>");
            open += 1;
            rest = tail;
            continue;
        }
        if open > 0
            && let Some(tail) = rest.strip_prefix("</b>")
        {
            sanitized.push_str("</b>");
            open -= 1;
            rest = tail;
            continue;
        }

        match c {
            '&' => sanitized.push_str("&amp;"),
            '<' => sanitized.push_str("&lt;"),
            '>' => sanitized.push_str("&gt;"),
            '"' => sanitized.push_str("&quot;"),
            '\'' => sanitized.push_str("&#x27;"),
            _ => sanitized.push(c),
        }
        rest = &rest[c.len_utf8()..];
    }

    for _ in 0..open {
        sanitized.push_str("</b>");
    }
    sanitized
}

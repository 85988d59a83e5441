//! Search attribution parameters.
//!
//! Search results carry an opaque `trackingParameters` string that has to
//! ride along on the result link so Shopify can attribute the click.

/// Build the query string for a search result link.
///
/// | `params` | `tracking` | result |
/// |----------|------------|--------|
/// | set      | set        | `?params&tracking` |
/// | set      | unset      | `?params` |
/// | unset    | set        | `?tracking` |
/// | unset    | unset      | empty |
///
/// Empty strings count as unset.
///
/// ```rust
/// use aula_storefront::search::apply_tracking_params;
///
/// assert_eq!(apply_tracking_params(Some("_pos=1"), Some("q=rust")), "?q=rust&_pos=1");
/// assert_eq!(apply_tracking_params(None, None), "");
/// ```
#[must_use]
pub fn apply_tracking_params(tracking: Option<&str>, params: Option<&str>) -> String {
    let tracking = tracking.filter(|t| !t.is_empty());
    let params = params.filter(|p| !p.is_empty());

    match (params, tracking) {
        (Some(params), Some(tracking)) => format!("?{params}&{tracking}"),
        (Some(params), None) => format!("?{params}"),
        (None, Some(tracking)) => format!("?{tracking}"),
        (None, None) => String::new(),
    }
}

//! Application flow pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::filters;
use crate::state::AppState;

/// Confirmation shown after an application is submitted.
#[derive(Template, WebTemplate)]
#[template(path = "pages/apply_thanks.html")]
pub struct ApplyThanksTemplate {
    pub shop_name: String,
}

/// Display the application confirmation page.
pub async fn thanks(State(state): State<AppState>) -> impl IntoResponse {
    ApplyThanksTemplate {
        shop_name: state.shop_name().to_string(),
    }
}

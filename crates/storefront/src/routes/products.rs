//! Product route handlers and shared product views.

use askama::Template;
use askama_web::WebTemplate;
use aula_core::ProductHandle;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::shopify::types::{Image, Product};
use crate::state::AppState;

/// Product card data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub handle: String,
    pub title: String,
    /// Link target, with search tracking parameters when present.
    pub url: String,
    pub price: Option<String>,
    pub image: Option<ImageView>,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ImageView {
    /// Build from an API image, using `fallback_alt` when it has no alt text.
    #[must_use]
    pub fn new(image: &Image, fallback_alt: &str) -> Self {
        Self {
            url: image.url.clone(),
            alt: image.alt_or(fallback_alt).to_string(),
            width: image.width,
            height: image.height,
        }
    }
}

impl ProductView {
    /// Card linking to the product page.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self::with_url(product, product.path())
    }

    /// Card linking to `url`.
    #[must_use]
    pub fn with_url(product: &Product, url: String) -> Self {
        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            url,
            price: product.price().map(|m| m.display()),
            image: product
                .primary_image()
                .map(|img| ImageView::new(img, &product.title)),
        }
    }
}

/// Product detail data for templates.
pub struct ProductDetailView {
    pub title: String,
    pub vendor: Option<String>,
    pub price: Option<String>,
    pub description_html: String,
    pub images: Vec<ImageView>,
    pub variants: Vec<VariantView>,
}

/// Variant display data for templates.
pub struct VariantView {
    pub title: String,
    pub price: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            vendor: product.vendor.clone().filter(|v| !v.is_empty()),
            price: product.price().map(|m| m.display()),
            description_html: product.description_html.clone(),
            images: product
                .images
                .iter()
                .map(|img| ImageView::new(img, &product.title))
                .collect(),
            variants: product
                .variants
                .iter()
                .filter(|v| v.title != "Default Title")
                .map(|v| VariantView {
                    title: v.title.clone(),
                    price: v.price.display(),
                })
                .collect(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub shop_name: String,
    pub product: ProductDetailView,
}

/// Display product detail page.
///
/// # Errors
///
/// Returns 404 for malformed or unknown handles.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let handle = ProductHandle::parse(&handle)
        .map_err(|e| AppError::NotFound(format!("product {handle:?}: {e}")))?;

    let product = state.storefront().get_product_by_handle(&handle).await?;

    Ok(ProductShowTemplate {
        shop_name: state.shop_name().to_string(),
        product: ProductDetailView::from(&product),
    })
}

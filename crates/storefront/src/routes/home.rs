//! Home page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

use super::collections::CollectionView;
use super::products::ProductView;

// =============================================================================
// Hero Configuration (Static content for carousel)
// =============================================================================

/// Carousel behaviour, emitted as `data-*` attributes for the carousel script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroSettings {
    pub dots: bool,
    pub infinite: bool,
    pub slides_to_show: u32,
    pub slides_to_scroll: u32,
    pub arrows: bool,
    pub autoplay: bool,
    /// Transition duration in milliseconds.
    pub speed_ms: u32,
    /// Delay between slides in milliseconds.
    pub autoplay_speed_ms: u32,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            dots: true,
            infinite: false,
            slides_to_show: 1,
            slides_to_scroll: 1,
            arrows: false,
            autoplay: true,
            speed_ms: 500,
            autoplay_speed_ms: 3000,
        }
    }
}

/// Visual weight of a hero call-to-action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CtaStyle {
    #[default]
    Primary,
    Secondary,
}

impl CtaStyle {
    /// CSS modifier class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Primary => "btn-primary",
            Self::Secondary => "btn-secondary",
        }
    }
}

/// A hero call-to-action link.
#[derive(Clone, Debug)]
pub struct HeroCta {
    pub label: String,
    pub url: String,
    pub style: CtaStyle,
}

/// A single slide in the hero carousel.
#[derive(Clone, Debug)]
pub struct HeroSlide {
    pub title: String,
    /// Underlined trailing part of the title.
    pub accent: String,
    pub ctas: Vec<HeroCta>,
}

/// Hero carousel configuration.
#[derive(Clone, Debug)]
pub struct HeroConfig {
    pub settings: HeroSettings,
    pub slides: Vec<HeroSlide>,
}

impl HeroCta {
    fn primary(label: &str) -> Self {
        Self {
            label: label.to_string(),
            url: "#".to_string(),
            style: CtaStyle::Primary,
        }
    }

    fn secondary(label: &str) -> Self {
        Self {
            style: CtaStyle::Secondary,
            ..Self::primary(label)
        }
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        let slide = |ctas: Vec<HeroCta>| HeroSlide {
            title: "Lorem ipsum dolor sit".to_string(),
            accent: " accusamus eum".to_string(),
            ctas,
        };

        Self {
            settings: HeroSettings::default(),
            slides: vec![
                slide(vec![HeroCta::primary("Ver más")]),
                slide(vec![
                    HeroCta::primary("Ver más"),
                    HeroCta::secondary("Contacto"),
                ]),
                slide(vec![HeroCta::primary("Ver más")]),
            ],
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub shop_name: String,
    /// Hero carousel configuration.
    pub hero: HeroConfig,
    /// Featured collections for the category list.
    pub categories: Vec<CollectionView>,
}

/// Recommended products fragment, fetched by the home page after load.
#[derive(Template, WebTemplate)]
#[template(path = "partials/recommended_products.html")]
pub struct RecommendedProductsTemplate {
    pub products: Vec<ProductView>,
}

/// Display the home page.
///
/// Recommended products are deferred to [`recommended_products`].
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let categories = state
        .storefront()
        .get_featured_collections()
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch featured collections: {e}");
                Vec::new()
            },
            |collections| collections.iter().map(CollectionView::from).collect(),
        );

    HomeTemplate {
        shop_name: state.shop_name().to_string(),
        hero: HeroConfig::default(),
        categories,
    }
}

/// Recommended products grid fragment.
#[instrument(skip(state))]
pub async fn recommended_products(State(state): State<AppState>) -> impl IntoResponse {
    let products = state
        .storefront()
        .get_recommended_products()
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch recommended products: {e}");
                Vec::new()
            },
            |products| products.iter().map(ProductView::new).collect(),
        );

    RecommendedProductsTemplate { products }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_defaults() {
        let hero = HeroConfig::default();
        assert_eq!(hero.slides.len(), 3);
        assert_eq!(hero.slides[1].ctas.len(), 2);
        assert_eq!(hero.slides[1].ctas[1].style, CtaStyle::Secondary);
        assert!(hero.settings.dots);
        assert!(!hero.settings.infinite);
        assert_eq!(hero.settings.autoplay_speed_ms, 3000);
    }

    #[test]
    fn test_home_renders_hero_and_categories() {
        let template = HomeTemplate {
            shop_name: "Hydrogen".to_string(),
            hero: HeroConfig::default(),
            categories: vec![CollectionView {
                handle: "design".to_string(),
                title: "Design".to_string(),
                url: "/collections/design".to_string(),
                description_html: None,
                image: None,
            }],
        };

        let html = template.render().unwrap();
        assert!(html.contains("<title>Hydrogen | Home</title>"));
        assert!(html.contains("href=\"/collections/design\""));
        assert!(html.contains("Cursos recomendados"));
        assert!(html.contains("Loading..."));
        assert!(html.contains("data-autoplay-speed=\"3000\""));
    }

    #[test]
    fn test_recommended_products_renders_cards() {
        let template = RecommendedProductsTemplate {
            products: vec![ProductView {
                handle: "rust-101".to_string(),
                title: "Rust 101".to_string(),
                url: "/products/rust-101".to_string(),
                price: Some("$49.00".to_string()),
                image: None,
            }],
        };

        let html = template.render().unwrap();
        assert!(html.contains("href=\"/products/rust-101\""));
        assert!(html.contains("$49.00"));
        assert!(html.contains("Ver curso"));
    }
}

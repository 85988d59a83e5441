//! Type conversion functions for Shopify Storefront API responses.

pub mod collections;
pub mod content;
pub mod products;
pub mod search;

pub use collections::{convert_collection, convert_featured_collection};
pub use content::{convert_article, convert_page};
pub use products::{convert_product, convert_product_card};
pub use search::{convert_predictive_search, convert_search};

use crate::shopify::types::{Image, Money, PageInfo, Seo};

use super::queries::{ImageFields, MoneyFields, PageInfoFields, SeoFields};

pub(crate) fn convert_image(i: ImageFields) -> Image {
    Image {
        id: i.id,
        url: i.url,
        alt_text: i.alt_text,
        width: i.width,
        height: i.height,
    }
}

pub(crate) fn convert_money(m: MoneyFields) -> Money {
    Money {
        amount: m.amount,
        currency_code: m.currency_code,
    }
}

pub(crate) fn convert_seo(s: SeoFields) -> Seo {
    Seo {
        title: s.title,
        description: s.description,
    }
}

pub(crate) fn convert_page_info(p: PageInfoFields) -> PageInfo {
    PageInfo {
        has_next_page: p.has_next_page,
        has_previous_page: p.has_previous_page,
        start_cursor: p.start_cursor,
        end_cursor: p.end_cursor,
    }
}

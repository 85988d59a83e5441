//! Product type conversion functions.

use crate::shopify::types::{PriceRange, Product, ProductVariant};

use super::super::queries::{ProductCardFields, product_by_handle};
use super::{convert_image, convert_money, convert_seo};

/// Convert the product card selection used by listings.
pub fn convert_product_card(product: ProductCardFields) -> Product {
    Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        vendor: None,
        description: String::new(),
        description_html: String::new(),
        seo: None,
        price_range: Some(PriceRange {
            min_variant_price: convert_money(product.price_range.min_variant_price),
        }),
        images: product
            .images
            .nodes
            .into_iter()
            .map(convert_image)
            .collect(),
        variants: vec![],
        tracking_parameters: None,
    }
}

pub fn convert_product(product: product_by_handle::ProductFields) -> Product {
    Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        vendor: product.vendor,
        description: product.description,
        description_html: product.description_html,
        seo: product.seo.map(convert_seo),
        price_range: Some(PriceRange {
            min_variant_price: convert_money(product.price_range.min_variant_price),
        }),
        images: product
            .images
            .nodes
            .into_iter()
            .map(convert_image)
            .collect(),
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(|v| ProductVariant {
                id: v.id,
                title: v.title,
                price: convert_money(v.price),
                image: v.image.map(convert_image),
            })
            .collect(),
        tracking_parameters: None,
    }
}

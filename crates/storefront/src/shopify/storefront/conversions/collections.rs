//! Collection type conversion functions.

use crate::shopify::types::Collection;

use super::super::queries::{collection_by_handle, featured_collections};
use super::{convert_image, convert_product_card, convert_seo};

pub fn convert_featured_collection(
    collection: featured_collections::FeaturedCollection,
) -> Collection {
    Collection {
        id: collection.id,
        handle: collection.handle,
        title: collection.title,
        description: String::new(),
        description_html: String::new(),
        seo: None,
        image: collection.image.map(convert_image),
        products: vec![],
        tracking_parameters: None,
    }
}

pub fn convert_collection(collection: collection_by_handle::CollectionFields) -> Collection {
    Collection {
        id: collection.id,
        handle: collection.handle,
        title: collection.title,
        description: collection.description,
        description_html: collection.description_html,
        seo: collection.seo.map(convert_seo),
        image: collection.image.map(convert_image),
        products: collection
            .products
            .nodes
            .into_iter()
            .map(convert_product_card)
            .collect(),
        tracking_parameters: None,
    }
}

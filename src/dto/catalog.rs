//! DTOs shaped for the catalog grid and product detail templates.

use crate::dto::ListingStatus;
use crate::dto::listing::ListingControls;
use crate::dto::product::{ProductCard, ProductDetail};

/// Data required to render the catalog grid.
pub struct CatalogPageData {
    pub products: Vec<ProductCard>,
    pub controls: ListingControls,
    pub status: ListingStatus,
}

pub struct ProductDetailData {
    pub product: ProductDetail,
}

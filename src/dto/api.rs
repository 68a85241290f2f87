//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::domain::product::Product;

/// Body of `GET /api/v1/products`.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    /// Number of products matching the filters across all pages.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub products: Vec<Product>,
}

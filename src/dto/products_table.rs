//! DTOs shaped for the admin products table.

use crate::domain::category::Category;
use crate::dto::ListingStatus;
use crate::dto::listing::{ListingControls, PaginationControls};
use crate::dto::product::ProductRow;
use crate::pagination::Paginated;

/// Data required to render the products table page.
#[derive(Debug)]
pub struct ProductsTablePageData {
    pub products: Paginated<ProductRow>,
    pub pagination: Option<PaginationControls>,
    pub controls: ListingControls,
    /// Options of the category select in the create and edit modals.
    pub categories: Vec<Category>,
    pub status: ListingStatus,
}

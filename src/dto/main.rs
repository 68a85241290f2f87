use crate::dto::ListingStatus;
use crate::dto::product::ProductCard;

/// Data required to render the home page.
pub struct HomePageData {
    /// Featured products shown under the hero.
    pub featured: Vec<ProductCard>,
    pub status: ListingStatus,
}

use crate::dto::main::HomePageData;
use crate::dto::product::ProductCard;
use crate::repository::{ProductListQuery, ProductReader};
use crate::services::load_listing;

/// Number of products in the home page grid.
pub const FEATURED_PRODUCTS: usize = 6;

/// Loads the featured products for the home page.
pub async fn load_home_page<R>(repo: &R) -> HomePageData
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::new().paginate(1, FEATURED_PRODUCTS);
    let (page, status) = load_listing(repo, &query).await;

    HomePageData {
        featured: page
            .products
            .iter()
            .take(FEATURED_PRODUCTS)
            .map(ProductCard::from)
            .collect(),
        status,
    }
}

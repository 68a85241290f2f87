//! Catalog grid and product detail pages.

use crate::domain::category::Category;
use crate::domain::types::ProductId;
use crate::dto::catalog::{CatalogPageData, ProductDetailData};
use crate::dto::listing::ListingControls;
use crate::dto::product::{ProductCard, ProductDetail};
use crate::query_state::QueryState;
use crate::repository::{CategoryReader, ProductListQuery, ProductReader};
use crate::services::{ServiceError, ServiceResult, load_listing};

pub const CATALOG_PATH: &str = "/products";

/// The catalog grid is not paginated and shows at most this many products.
pub const CATALOG_LIMIT: usize = 30;

/// Loads the category list, degrading to no categories on failure.
pub async fn load_categories<R>(repo: &R) -> Vec<Category>
where
    R: CategoryReader + ?Sized,
{
    match repo.list_categories().await {
        Ok(slugs) => slugs.into_iter().map(Category::new).collect(),
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            Vec::new()
        }
    }
}

/// Loads the catalog grid honouring the search, category and sort in `state`.
pub async fn load_catalog_page<R>(repo: &R, state: &QueryState) -> CatalogPageData
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let query = ProductListQuery::from_query_state(state);
    let (page, status) = load_listing(repo, &query).await;
    let categories = load_categories(repo).await;

    CatalogPageData {
        products: page
            .products
            .iter()
            .take(CATALOG_LIMIT)
            .map(ProductCard::from)
            .collect(),
        controls: ListingControls::new(state, CATALOG_PATH, &categories),
        status,
    }
}

pub async fn load_product_detail<R>(repo: &R, product_id: i64) -> ServiceResult<ProductDetailData>
where
    R: ProductReader + ?Sized,
{
    let product_id = ProductId::new(product_id)?;

    match repo.get_product(product_id).await {
        Ok(Some(product)) => Ok(ProductDetailData {
            product: ProductDetail::from(&product),
        }),
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Failed to get product {product_id}: {err}");
            Err(err.into())
        }
    }
}

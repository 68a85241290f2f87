use crate::dto::api::ProductsResponse;
use crate::query_state::QueryState;
use crate::repository::{ProductListQuery, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Returns one page of products filtered by the listing parameters.
///
/// Unlike the HTML views this does not fall back to previous data.
pub async fn list_products<R>(repo: &R, state: &QueryState) -> ServiceResult<ProductsResponse>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::from_query_state(state).paginate(state.page, state.limit);

    let page = repo.list_products(&query).await.map_err(|err| {
        log::error!("Failed to list products: {err}");
        ServiceError::from(err)
    })?;

    Ok(ProductsResponse {
        total: page.total,
        page: state.page,
        limit: state.limit,
        products: page.products,
    })
}

//! Admin products table: listing with filters and the create, edit and
//! delete modals.

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::dto::listing::{ListingControls, PaginationControls};
use crate::dto::product::ProductRow;
use crate::dto::products_table::ProductsTablePageData;
use crate::forms::product::ProductForm;
use crate::pagination::{Paginated, max_page};
use crate::query_state::QueryState;
use crate::repository::{CategoryReader, ProductListQuery, ProductReader, ProductWriter};
use crate::services::catalog::load_categories;
use crate::services::{ServiceError, ServiceResult, load_listing};

pub const PRODUCTS_TABLE_PATH: &str = "/products-table";

/// Outcome of loading the table for the state in the URL.
#[derive(Debug)]
pub enum ProductsTableView {
    Page(ProductsTablePageData),
    /// The requested page lies past the last one; holds the URL of the
    /// last page.
    OutOfRange(String),
}

pub async fn load_products_table<R>(repo: &R, state: &QueryState) -> ProductsTableView
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let query = ProductListQuery::from_query_state(state).paginate(state.page, state.limit);
    let (page, status) = load_listing(repo, &query).await;

    let last_page = max_page(page.total, state.limit);
    if last_page >= 1 && state.page > last_page {
        log::warn!("Page {} is past the last page {last_page}", state.page);
        let last = state.with_page(last_page);
        return ProductsTableView::OutOfRange(last.to_url(PRODUCTS_TABLE_PATH));
    }

    let rows = page.products.iter().map(ProductRow::from).collect();
    let products = Paginated::new(rows, state.page, page.total, state.limit);
    let pagination = PaginationControls::new(&products, state, PRODUCTS_TABLE_PATH);

    let categories = load_categories(repo).await;
    let controls = ListingControls::new(state, PRODUCTS_TABLE_PATH, &categories);

    ProductsTableView::Page(ProductsTablePageData {
        products,
        pagination,
        controls,
        categories,
        status,
    })
}

/// Table view to return to after a form submission. `query` is the state
/// the form was opened from; it is re-normalized, never used verbatim.
pub fn return_url(query: &str) -> String {
    QueryState::parse(query).to_url(PRODUCTS_TABLE_PATH)
}

/// Target of an explicit search submission.
pub fn search_url(query: &str, term: &str) -> String {
    QueryState::parse(query)
        .submit_search(term)
        .to_url(PRODUCTS_TABLE_PATH)
}

fn validate(form: ProductForm) -> ServiceResult<NewProduct> {
    NewProduct::try_from(form).map_err(|err| {
        log::warn!("Rejected product form: {err}");
        ServiceError::from(err)
    })
}

pub async fn create_product<R>(repo: &R, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let payload = validate(form)?;

    repo.create_product(&payload).await.map_err(|err| {
        log::error!("Failed to create product: {err}");
        ServiceError::from(err)
    })
}

pub async fn update_product<R>(repo: &R, product_id: i64, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let product_id = ProductId::new(product_id)?;
    let payload = validate(form)?;

    repo.update_product(product_id, &payload)
        .await
        .map_err(|err| {
            log::error!("Failed to update product {product_id}: {err}");
            ServiceError::from(err)
        })
}

pub async fn delete_product<R>(repo: &R, product_id: i64) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let product_id = ProductId::new(product_id)?;

    repo.delete_product(product_id).await.map_err(|err| {
        log::error!("Failed to delete product {product_id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::ListingStatus;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{page, product};

    fn form(title: &str) -> ProductForm {
        ProductForm {
            title: title.to_string(),
            description: "Brand new".to_string(),
            category: "beauty".to_string(),
            price: "12.50".to_string(),
            discount_percentage: String::new(),
            images: vec!["https://cdn.example.com/new.png".to_string()],
            query: String::new(),
        }
    }

    fn table_page(view: ProductsTableView) -> ProductsTablePageData {
        match view {
            ProductsTableView::Page(data) => data,
            ProductsTableView::OutOfRange(url) => panic!("unexpected redirect to {url}"),
        }
    }

    #[actix_web::test]
    async fn table_is_paginated_with_window() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| {
                query.pagination.as_ref().map(|p| (p.page, p.per_page, p.skip())) == Some((5, 10, 40))
            })
            .times(1)
            .returning(|_| {
                let products = (41..=50)
                    .map(|id| product(id, &format!("Item {id}"), "beauty", id as f64))
                    .collect();
                Ok(page(products, 95))
            });
        repo.expect_list_categories()
            .returning(|| Ok(vec!["beauty".to_string(), "home-decoration".to_string()]));

        let data = table_page(load_products_table(&repo, &QueryState::parse("page=5")).await);

        assert_eq!(data.products.items.len(), 10);
        assert_eq!(data.products.items[0].id, 41);
        assert_eq!(data.products.max_page, 10);
        let pagination = data.pagination.unwrap();
        assert_eq!(pagination.pages.first().unwrap().number, Some(1));
        assert_eq!(pagination.pages.last().unwrap().number, Some(10));
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.status, ListingStatus::Fresh);
    }

    #[actix_web::test]
    async fn page_past_the_end_redirects_to_last_page() {
        let mut repo = MockRepository::new();
        repo.expect_list_products().returning(|_| Ok(page(Vec::new(), 5)));
        repo.expect_list_categories().never();
        let state = QueryState::parse("category=beauty&page=99&limit=2");

        let view = load_products_table(&repo, &state).await;

        assert!(matches!(
            view,
            ProductsTableView::OutOfRange(url) if url == "/products-table?category=beauty&page=3&limit=2"
        ));
    }

    #[actix_web::test]
    async fn empty_result_renders_requested_page() {
        let mut repo = MockRepository::new();
        repo.expect_list_products().returning(|_| Ok(page(Vec::new(), 0)));
        repo.expect_list_categories().returning(|| Ok(Vec::new()));

        let data = table_page(load_products_table(&repo, &QueryState::parse("page=4")).await);

        assert!(data.products.items.is_empty());
        assert!(data.pagination.is_none());
    }

    #[actix_web::test]
    async fn valid_form_is_sent_as_payload() {
        let mut repo = MockRepository::new();
        repo.expect_create_product()
            .withf(|payload| {
                payload.title.as_str() == "Desk Lamp"
                    && payload.price.get() == 12.5
                    && payload.images.len() == 1
            })
            .times(1)
            .returning(|_| Ok(product(3, "Desk Lamp", "beauty", 12.5)));

        let created = create_product(&repo, form("Desk Lamp")).await.unwrap();

        assert_eq!(created.id, 3);
    }

    #[actix_web::test]
    async fn invalid_form_never_reaches_the_repository() {
        let mut repo = MockRepository::new();
        repo.expect_create_product().never();
        let invalid = ProductForm {
            price: "0".to_string(),
            ..form("Desk Lamp")
        };

        let result = create_product(&repo, invalid).await;

        assert!(matches!(result, Err(ServiceError::Form(msg)) if msg == "Price must be greater than zero"));
    }

    #[actix_web::test]
    async fn update_targets_the_given_product() {
        let mut repo = MockRepository::new();
        repo.expect_update_product()
            .withf(|id, payload| id.get() == 2 && payload.title.as_str() == "Renamed")
            .times(1)
            .returning(|_, _| Ok(product(2, "Renamed", "beauty", 12.5)));

        let updated = update_product(&repo, 2, form("Renamed")).await.unwrap();

        assert_eq!(updated.title, "Renamed");
    }

    #[actix_web::test]
    async fn update_failure_is_a_repository_error() {
        let mut repo = MockRepository::new();
        repo.expect_update_product()
            .returning(|_, _| Err(RepositoryError::ConnectionError("offline".into())));

        assert!(matches!(
            update_product(&repo, 2, form("Again")).await,
            Err(ServiceError::Repository(_))
        ));
    }

    #[actix_web::test]
    async fn delete_outcomes() {
        let mut repo = MockRepository::new();
        let mut calls = 0;
        repo.expect_delete_product()
            .withf(|id| id.get() == 1)
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Ok(())
                } else {
                    Err(RepositoryError::NotFound)
                }
            });

        delete_product(&repo, 1).await.unwrap();
        assert!(matches!(
            delete_product(&repo, 1).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn invalid_id_is_rejected_before_delete() {
        let mut repo = MockRepository::new();
        repo.expect_delete_product().never();

        assert!(matches!(
            delete_product(&repo, -4).await,
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[test]
    fn form_redirects_are_rebuilt_from_state() {
        assert_eq!(return_url("category=beauty&page=2"), "/products-table?category=beauty&page=2");
        assert_eq!(return_url("https://evil.example.com"), PRODUCTS_TABLE_PATH);
        assert_eq!(
            search_url("category=beauty&page=3", "mascara"),
            "/products-table?search=mascara&page=1"
        );
        assert_eq!(search_url("category=beauty&page=3", "  "), PRODUCTS_TABLE_PATH);
    }
}

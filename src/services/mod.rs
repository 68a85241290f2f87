//! Use cases behind the HTTP routes.

use thiserror::Error;

use crate::domain::product::ProductPage;
use crate::dto::ListingStatus;
use crate::repository::errors::RepositoryError;
use crate::repository::{ProductListQuery, ProductReader};

pub mod api;
pub mod catalog;
pub mod main;
pub mod products_table;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// User submitted data that cannot be accepted. The message is shown
    /// as is.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Loads a listing, falling back to the last page loaded for the same
/// query when the remote API fails.
pub async fn load_listing<R>(repo: &R, query: &ProductListQuery) -> (ProductPage, ListingStatus)
where
    R: ProductReader + ?Sized,
{
    match repo.list_products(query).await {
        Ok(page) => (page, ListingStatus::Fresh),
        Err(err) => {
            log::error!("Failed to list products: {err}");
            match repo.previous_products(query) {
                Some(page) => {
                    log::warn!("Serving previously loaded products for {query:?}");
                    (page, ListingStatus::Previous)
                }
                None => (ProductPage::default(), ListingStatus::Unavailable),
            }
        }
    }
}

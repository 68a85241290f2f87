use crate::{
    domain::{
        product::{NewProduct, Product, ProductPage},
        types::{ProductId, SortField, SortOrder},
    },
    query_state::QueryState,
    repository::errors::RepositoryResult,
};

pub mod cache;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod remote;

pub use cache::ProductCache;
pub use remote::RemoteRepository;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn skip(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Listing request. Also the cache key: two queries that compare equal
/// share one cached response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<(SortField, SortOrder)>,
    pub pagination: Option<Pagination>,
}

/// The three mutually exclusive upstream request shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingRequest<'a> {
    All,
    Search(&'a str),
    Category(&'a str),
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters, sort and page of a listing view. Pagination is left to the
    /// caller.
    pub fn from_query_state(state: &QueryState) -> Self {
        Self {
            search: state.search.clone(),
            category: state.category.clone(),
            sort: state.sort_by.map(|field| (field, state.order)),
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = Some((field, order));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Search wins over category; the two are never combined.
    pub fn request(&self) -> ListingRequest<'_> {
        let search = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match (search, category) {
            (Some(term), _) => ListingRequest::Search(term),
            (None, Some(category)) => ListingRequest::Category(category),
            (None, None) => ListingRequest::All,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ProductReader {
    async fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<ProductPage>;
    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Last page successfully loaded for `query`, even if it has since been
    /// invalidated.
    fn previous_products(&self, query: &ProductListQuery) -> Option<ProductPage>;
}

#[allow(async_fn_in_trait)]
pub trait CategoryReader {
    async fn list_categories(&self) -> RepositoryResult<Vec<String>>;
}

#[allow(async_fn_in_trait)]
pub trait ProductWriter {
    async fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    async fn update_product(&self, id: ProductId, product: &NewProduct)
    -> RepositoryResult<Product>;
    async fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
}

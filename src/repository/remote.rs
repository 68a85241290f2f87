use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::domain::product::{NewProduct, Product, ProductPage};
use crate::domain::types::ProductId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CategoryReader, ListingRequest, ProductCache, ProductListQuery, ProductReader, ProductWriter,
};

/// Repository backed by a DummyJSON-compatible HTTP API.
#[derive(Clone)]
pub struct RemoteRepository {
    client: Client,
    base_url: Url,
    cache: ProductCache,
}

impl RemoteRepository {
    pub fn new(base_url: &str, timeout: Duration, cache: ProductCache) -> RepositoryResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RepositoryError::ValidationError(format!("Invalid API base url: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::ValidationError(format!(
                "API base url cannot have paths appended: {base_url}"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            cache,
        })
    }

    pub fn cache(&self) -> &ProductCache {
        &self.cache
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Upstream url for a listing request.
    pub fn listing_url(&self, query: &ProductListQuery) -> Url {
        let mut params: Vec<(&str, String)> = Vec::new();

        let mut url = match query.request() {
            ListingRequest::All => self.endpoint(&["products"]),
            ListingRequest::Search(term) => {
                params.push(("q", term.to_string()));
                self.endpoint(&["products", "search"])
            }
            ListingRequest::Category(category) => self.endpoint(&["products", "category", category]),
        };

        if let Some(pagination) = &query.pagination {
            params.push(("limit", pagination.per_page.to_string()));
            params.push(("skip", pagination.skip().to_string()));
        }

        if let Some((field, order)) = query.sort {
            params.push(("sortBy", field.as_str().to_string()));
            params.push(("order", order.as_str().to_string()));
        }

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }

    pub fn product_url(&self, id: ProductId) -> Url {
        self.endpoint(&["products", &id.to_string()])
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> RepositoryResult<T> {
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

impl ProductReader for RemoteRepository {
    async fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<ProductPage> {
        let url = self.listing_url(query);
        let request = self.client.get(url.clone());

        self.cache
            .listing(query, async move {
                log::debug!("Fetching {url}");
                Self::send::<ProductPage>(request).await
            })
            .await
    }

    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let request = self.client.get(self.product_url(id));

        match self.cache.detail(id, Self::send::<Product>(request)).await {
            Ok(product) => Ok(Some(product)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn previous_products(&self, query: &ProductListQuery) -> Option<ProductPage> {
        self.cache.previous(query)
    }
}

impl CategoryReader for RemoteRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<String>> {
        let request = self
            .client
            .get(self.endpoint(&["products", "category-list"]));

        self.cache.categories(Self::send::<Vec<String>>(request)).await
    }
}

impl ProductWriter for RemoteRepository {
    async fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        let request = self
            .client
            .post(self.endpoint(&["products", "add"]))
            .json(product);

        let created = Self::send::<Product>(request).await?;
        self.cache.invalidate_products();
        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> RepositoryResult<Product> {
        let request = self.client.put(self.product_url(id)).json(product);

        let updated = Self::send::<Product>(request).await?;
        self.cache.invalidate_products();
        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        self.client
            .delete(self.product_url(id))
            .send()
            .await?
            .error_for_status()?;

        self.cache.invalidate_products();
        Ok(())
    }
}

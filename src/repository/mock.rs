//! Mock repository for isolating services in tests.

use mockall::mock;

use crate::domain::product::{NewProduct, Product, ProductPage};
use crate::domain::types::ProductId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, ProductListQuery, ProductReader, ProductWriter};

mock! {
    pub Repository {}

    impl ProductReader for Repository {
        async fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<ProductPage>;
        async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
        fn previous_products(&self, query: &ProductListQuery) -> Option<ProductPage>;
    }

    impl CategoryReader for Repository {
        async fn list_categories(&self) -> RepositoryResult<Vec<String>>;
    }

    impl ProductWriter for Repository {
        async fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
        async fn update_product(
            &self,
            id: ProductId,
            product: &NewProduct,
        ) -> RepositoryResult<Product>;
        async fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
    }
}

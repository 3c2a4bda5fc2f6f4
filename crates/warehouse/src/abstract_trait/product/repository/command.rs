use crate::model::product::{NewProduct, Product as ProductModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Stores a new product and returns it with its assigned id.
    async fn insert(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError>;

    /// Persists `updated`'s counters only if the stored counters still equal
    /// `expected`'s; otherwise fails with [`RepositoryError::Conflict`].
    async fn update_quantities(
        &self,
        expected: &ProductModel,
        updated: &ProductModel,
    ) -> Result<ProductModel, RepositoryError>;
}

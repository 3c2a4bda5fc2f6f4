//! Process-local product store, used when no database is configured and as
//! the backing store in tests.

use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductFilter, ProductQueryRepositoryTrait,
    },
    model::product::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    rows: BTreeMap<i64, ProductModel>,
    last_id: i64,
}

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    store: RwLock<Store>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `(name, in_stock, reserved)` rows with ids `1..=n`.
    pub fn with_products(products: &[(&str, i64, i64)]) -> Self {
        let mut store = Store::default();
        for (name, in_stock_quantity, reserved_quantity) in products {
            store.last_id += 1;
            store.rows.insert(
                store.last_id,
                ProductModel {
                    id: store.last_id,
                    name: name.to_string(),
                    in_stock_quantity: *in_stock_quantity,
                    reserved_quantity: *reserved_quantity,
                },
            );
        }

        Self {
            store: RwLock::new(store),
        }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn query(&self, filter: &ProductFilter) -> Result<Vec<ProductModel>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductRepository {
    async fn insert(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        let mut store = self.store.write().await;

        if store.rows.values().any(|p| p.name == product.name) {
            return Err(RepositoryError::Conflict(format!(
                "product name '{}' already exists",
                product.name
            )));
        }

        store.last_id += 1;
        let created = ProductModel {
            id: store.last_id,
            name: product.name.clone(),
            in_stock_quantity: product.in_stock_quantity,
            reserved_quantity: product.reserved_quantity,
        };
        store.rows.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update_quantities(
        &self,
        expected: &ProductModel,
        updated: &ProductModel,
    ) -> Result<ProductModel, RepositoryError> {
        let mut store = self.store.write().await;

        let row = store
            .rows
            .get_mut(&expected.id)
            .ok_or(RepositoryError::NotFound)?;

        if row.in_stock_quantity != expected.in_stock_quantity
            || row.reserved_quantity != expected.reserved_quantity
        {
            return Err(RepositoryError::Conflict(format!(
                "product {} was modified concurrently",
                expected.id
            )));
        }

        row.in_stock_quantity = updated.in_stock_quantity;
        row.reserved_quantity = updated.reserved_quantity;

        Ok(row.clone())
    }
}

use crate::{
    abstract_trait::product::{
        repository::{DynProductQueryRepository, ProductFilter},
        service::ProductQueryServiceTrait,
    },
    domain::response::ProductResponse,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Self { query, metrics }
    }

    fn complete(&self, operation: &str, started: Instant, is_success: bool) {
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        self.metrics.record(
            Method::Get,
            operation,
            status,
            started.elapsed().as_secs_f64(),
        );
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductResponse>, ServiceError> {
        let started = Instant::now();
        info!("🔍 Fetching product {id}");

        let result = self.query.find_by_id(id).await;
        self.complete("find_by_id", started, result.is_ok());

        match result {
            Ok(product) => Ok(product.map(ProductResponse::from)),
            Err(e) => {
                error!("❌ Failed to fetch product {id}: {e:?}");
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_in_stock(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let started = Instant::now();

        let result = self.query.query(&ProductFilter::InStock).await;
        self.complete("find_in_stock", started, result.is_ok());

        let products = result.map_err(|e| {
            error!("❌ Failed to list in-stock products: {e:?}");
            ServiceError::Repo(e)
        })?;

        info!("✅ Found {} products with available stock", products.len());

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProductRepository;
    use std::sync::Arc;

    fn service(products: &[(&str, i64, i64)]) -> ProductQueryService {
        let mut registry = Registry::default();
        ProductQueryService::new(
            Arc::new(InMemoryProductRepository::with_products(products)),
            &mut registry,
        )
    }

    #[tokio::test]
    async fn find_by_id_maps_to_response() {
        let svc = service(&[("Widget", 5, 4)]);

        let found = svc.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.name, "Widget");
        assert_eq!(found.in_stock_quantity, 5);
        assert_eq!(found.reserved_quantity, 4);

        assert!(svc.find_by_id(999_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn only_products_with_free_stock_are_listed() {
        let svc = service(&[
            ("Empty", 0, 0),
            ("Fully reserved", 3, 3),
            ("Available", 5, 4),
            ("Fresh", 2, 0),
        ]);

        let names: Vec<String> = svc
            .find_in_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Available", "Fresh"]);
    }
}

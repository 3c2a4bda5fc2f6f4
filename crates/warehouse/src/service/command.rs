use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository, ProductFilter},
        service::ProductCommandServiceTrait,
    },
    domain::{
        requests::{CreateProductRequest, QuantityRequest},
        response::{CreateResult, ErrorReason, OperationResult, ProductResponse},
    },
    model::product::Product as ProductModel,
    service::{naming, stock},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status},
};
use tokio::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};

type Transition = fn(&ProductModel, i64) -> Result<ProductModel, ErrorReason>;

#[derive(Clone)]
pub struct ProductCommandService {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Self {
            query,
            command,
            metrics,
        }
    }

    fn complete(&self, operation: &str, started: Instant, is_success: bool) {
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        self.metrics.record(
            Method::Post,
            operation,
            status,
            started.elapsed().as_secs_f64(),
        );
    }

    /// Runs one fetch → decide → persist cycle for a quantity request.
    async fn apply(
        &self,
        operation: &str,
        req: &QuantityRequest,
        transition: Transition,
    ) -> Result<OperationResult, ServiceError> {
        if let Err(reason) = req.check() {
            warn!("⚠️ {operation} rejected for product {}: {reason}", req.id);
            return Ok(OperationResult::failed(reason));
        }

        let product = match self.query.find_by_id(req.id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                warn!("⚠️ {operation} rejected: no product with id {}", req.id);
                return Ok(OperationResult::failed(ErrorReason::InvalidRequest));
            }
            Err(e) => {
                error!("❌ Failed to load product {} for {operation}: {e:?}", req.id);
                return Err(ServiceError::Repo(e));
            }
        };

        let updated = match transition(&product, req.quantity) {
            Ok(updated) => updated,
            Err(reason) => {
                warn!(
                    "⚠️ {operation} rejected for product {} (in stock {}, reserved {}, requested {}): {reason}",
                    product.id, product.in_stock_quantity, product.reserved_quantity, req.quantity
                );
                return Ok(OperationResult::failed(reason));
            }
        };

        let stored = self
            .command
            .update_quantities(&product, &updated)
            .await
            .map_err(|e| {
                error!("❌ Failed to persist {operation} for product {}: {e:?}", product.id);
                ServiceError::Repo(e)
            })?;

        info!(
            "✅ {operation} applied to product {} (in stock {}, reserved {})",
            stored.id, stored.in_stock_quantity, stored.reserved_quantity
        );

        Ok(OperationResult::ok())
    }

    async fn run(
        &self,
        operation: &'static str,
        req: &QuantityRequest,
        transition: Transition,
    ) -> Result<OperationResult, ServiceError> {
        let started = Instant::now();
        let span = info_span!("inventory", operation, product.id = req.id, quantity = req.quantity);

        let outcome = self.apply(operation, req, transition).instrument(span).await;

        let is_success = matches!(&outcome, Ok(result) if result.success);
        self.complete(operation, started, is_success);
        outcome
    }

    async fn create(
        &self,
        req: &CreateProductRequest,
    ) -> Result<CreateResult<ProductResponse>, ServiceError> {
        if let Err(reason) = req.check() {
            warn!("⚠️ create rejected: {reason}");
            return Ok(CreateResult::failed(reason));
        }

        let raw = req.name.as_deref().unwrap_or_default();
        // a blank name keeps its whitespace so the stored name is never empty
        let base = match raw.trim() {
            "" => raw,
            trimmed => trimmed,
        };

        let existing = self
            .query
            .query(&ProductFilter::NamePrefix(base.to_string()))
            .await
            .map_err(|e| {
                error!("❌ Failed to scan names starting with '{base}': {e:?}");
                ServiceError::Repo(e)
            })?;

        let name = naming::unique_name(base, existing.iter().map(|p| p.name.as_str()));
        if name != base {
            info!("🔁 Name '{base}' is taken, storing as '{name}'");
        }

        let stored = self
            .command
            .insert(&stock::new_product(name, req.in_stock_quantity))
            .await
            .map_err(|e| {
                error!("❌ Failed to insert product: {e:?}");
                ServiceError::Repo(e)
            })?;

        info!("✅ Created product {} ('{}')", stored.id, stored.name);

        Ok(CreateResult::created(ProductResponse::from(stored)))
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn reserve(&self, req: &QuantityRequest) -> Result<OperationResult, ServiceError> {
        self.run("reserve", req, stock::reserve).await
    }

    async fn ship(&self, req: &QuantityRequest) -> Result<OperationResult, ServiceError> {
        self.run("ship", req, stock::ship).await
    }

    async fn restock(&self, req: &QuantityRequest) -> Result<OperationResult, ServiceError> {
        self.run("restock", req, stock::restock).await
    }

    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<CreateResult<ProductResponse>, ServiceError> {
        let started = Instant::now();
        let span = info_span!("inventory", operation = "create");

        let outcome = self.create(req).instrument(span).await;

        let is_success = matches!(&outcome, Ok(result) if result.success);
        self.complete("create", started, is_success);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::product::repository::{
            ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
        },
        model::product::NewProduct,
        repository::InMemoryProductRepository,
    };
    use shared::errors::RepositoryError;
    use std::sync::{Arc, Mutex};

    /// Wraps the in-memory store and records every write it receives.
    #[derive(Default)]
    struct RecordingRepository {
        inner: InMemoryProductRepository,
        updates: Mutex<Vec<ProductModel>>,
        inserts: Mutex<Vec<NewProduct>>,
    }

    impl RecordingRepository {
        fn seeded(products: &[(&str, i64, i64)]) -> Arc<Self> {
            Arc::new(Self {
                inner: InMemoryProductRepository::with_products(products),
                ..Default::default()
            })
        }

        fn updates(&self) -> Vec<ProductModel> {
            self.updates.lock().unwrap().clone()
        }

        fn inserts(&self) -> Vec<NewProduct> {
            self.inserts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductQueryRepositoryTrait for RecordingRepository {
        async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
            self.inner.find_by_id(id).await
        }

        async fn query(
            &self,
            filter: &ProductFilter,
        ) -> Result<Vec<ProductModel>, RepositoryError> {
            self.inner.query(filter).await
        }
    }

    #[async_trait]
    impl ProductCommandRepositoryTrait for RecordingRepository {
        async fn insert(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
            self.inserts.lock().unwrap().push(product.clone());
            self.inner.insert(product).await
        }

        async fn update_quantities(
            &self,
            expected: &ProductModel,
            updated: &ProductModel,
        ) -> Result<ProductModel, RepositoryError> {
            self.updates.lock().unwrap().push(updated.clone());
            self.inner.update_quantities(expected, updated).await
        }
    }

    /// Repository whose reads always fail.
    struct BrokenRepository;

    #[async_trait]
    impl ProductQueryRepositoryTrait for BrokenRepository {
        async fn find_by_id(&self, _id: i64) -> Result<Option<ProductModel>, RepositoryError> {
            Err(RepositoryError::Custom("connection refused".into()))
        }

        async fn query(
            &self,
            _filter: &ProductFilter,
        ) -> Result<Vec<ProductModel>, RepositoryError> {
            Err(RepositoryError::Custom("connection refused".into()))
        }
    }

    #[async_trait]
    impl ProductCommandRepositoryTrait for BrokenRepository {
        async fn insert(&self, _product: &NewProduct) -> Result<ProductModel, RepositoryError> {
            Err(RepositoryError::Custom("connection refused".into()))
        }

        async fn update_quantities(
            &self,
            _expected: &ProductModel,
            _updated: &ProductModel,
        ) -> Result<ProductModel, RepositoryError> {
            Err(RepositoryError::Custom("connection refused".into()))
        }
    }

    fn service(repo: Arc<RecordingRepository>) -> ProductCommandService {
        let mut registry = Registry::default();
        ProductCommandService::new(repo.clone(), repo, &mut registry)
    }

    fn qty(id: i64, quantity: i64) -> QuantityRequest {
        QuantityRequest { id, quantity }
    }

    fn create_req(name: Option<&str>, in_stock: i64) -> CreateProductRequest {
        CreateProductRequest {
            id: Some(42),
            in_stock_quantity: in_stock,
            reserved_quantity: 9,
            name: name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn non_positive_quantities_never_touch_storage() {
        let repo = RecordingRepository::seeded(&[("Widget", 5, 4)]);
        let svc = service(repo.clone());

        for quantity in [0, -1] {
            for result in [
                svc.reserve(&qty(1, quantity)).await.unwrap(),
                svc.ship(&qty(1, quantity)).await.unwrap(),
                svc.restock(&qty(1, quantity)).await.unwrap(),
            ] {
                assert_eq!(result, OperationResult::failed(ErrorReason::QuantityInvalid));
            }
        }

        assert!(repo.updates().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_an_invalid_request() {
        let repo = RecordingRepository::seeded(&[]);
        let svc = service(repo.clone());

        for result in [
            svc.reserve(&qty(999_999, 1)).await.unwrap(),
            svc.ship(&qty(999_999, 1)).await.unwrap(),
            svc.restock(&qty(999_999, 1)).await.unwrap(),
        ] {
            assert_eq!(result, OperationResult::failed(ErrorReason::InvalidRequest));
        }

        assert!(repo.updates().is_empty());
    }

    #[tokio::test]
    async fn reserve_persists_incremented_reservation() {
        let repo = RecordingRepository::seeded(&[("Widget", 5, 4)]);
        let svc = service(repo.clone());

        let result = svc.reserve(&qty(1, 2)).await.unwrap();
        assert_eq!(result, OperationResult::failed(ErrorReason::NotEnoughQuantity));
        assert!(repo.updates().is_empty());

        let result = svc.reserve(&qty(1, 1)).await.unwrap();
        assert_eq!(result, OperationResult::ok());

        let updates = repo.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].reserved_quantity, 5);
        assert_eq!(updates[0].in_stock_quantity, 5);
    }

    #[tokio::test]
    async fn ship_persists_both_counters() {
        let repo = RecordingRepository::seeded(&[("Widget", 5, 4)]);
        let svc = service(repo.clone());

        let result = svc.ship(&qty(1, 2)).await.unwrap();
        assert_eq!(result, OperationResult::failed(ErrorReason::NotEnoughQuantity));

        let result = svc.ship(&qty(1, 1)).await.unwrap();
        assert!(result.success);

        let updates = repo.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].in_stock_quantity, 4);
        assert_eq!(updates[0].reserved_quantity, 3);
    }

    #[tokio::test]
    async fn restock_persists_new_stock() {
        let repo = RecordingRepository::seeded(&[("Widget", 5, 0)]);
        let svc = service(repo.clone());

        assert!(svc.restock(&qty(1, 1)).await.unwrap().success);

        let stored = repo.inner.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.in_stock_quantity, 6);
    }

    #[tokio::test]
    async fn create_keeps_a_fresh_name_and_forces_zero_reservation() {
        let repo = RecordingRepository::seeded(&[]);
        let svc = service(repo.clone());

        let result = svc
            .create_product(&create_req(Some("  Great Product "), 3))
            .await
            .unwrap();

        assert!(result.success);
        let model = result.model.unwrap();
        assert_eq!(model.name, "Great Product");
        assert_eq!(model.in_stock_quantity, 3);
        assert_eq!(model.reserved_quantity, 0);
        assert_ne!(model.id, 42);
    }

    #[tokio::test]
    async fn create_disambiguates_a_taken_name() {
        let repo = RecordingRepository::seeded(&[("Great Product", 1, 0)]);
        let svc = service(repo.clone());

        let first = svc
            .create_product(&create_req(Some("Great Product"), 1))
            .await
            .unwrap();
        assert_eq!(first.model.unwrap().name, "Great Product (1)");

        let second = svc
            .create_product(&create_req(Some("Great Product"), 1))
            .await
            .unwrap();
        assert_eq!(second.model.unwrap().name, "Great Product (2)");
    }

    #[tokio::test]
    async fn blank_name_is_stored_untrimmed() {
        let repo = RecordingRepository::seeded(&[("Widget", 1, 0)]);
        let svc = service(repo.clone());

        let first = svc
            .create_product(&create_req(Some("   "), 2))
            .await
            .unwrap();
        assert!(first.success);
        assert_eq!(first.model.unwrap().name, "   ");

        let second = svc
            .create_product(&create_req(Some("   "), 2))
            .await
            .unwrap();
        assert_eq!(second.model.unwrap().name, "    (1)");

        assert!(repo.inserts().iter().all(|p| !p.name.is_empty()));
    }

    #[tokio::test]
    async fn create_rejections_never_insert() {
        let repo = RecordingRepository::seeded(&[]);
        let svc = service(repo.clone());

        let negative = svc
            .create_product(&create_req(Some("Widget"), -1))
            .await
            .unwrap();
        assert_eq!(negative, CreateResult::failed(ErrorReason::QuantityInvalid));

        let empty = svc.create_product(&create_req(Some(""), 1)).await.unwrap();
        assert_eq!(empty, CreateResult::failed(ErrorReason::InvalidRequest));

        let missing = svc.create_product(&create_req(None, 1)).await.unwrap();
        assert_eq!(missing, CreateResult::failed(ErrorReason::InvalidRequest));

        assert!(repo.inserts().is_empty());
    }

    #[tokio::test]
    async fn repository_failures_propagate() {
        let broken = Arc::new(BrokenRepository);
        let mut registry = Registry::default();
        let svc = ProductCommandService::new(broken.clone(), broken, &mut registry);

        let err = svc.reserve(&qty(1, 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Repo(RepositoryError::Custom(_))));

        let err = svc
            .create_product(&create_req(Some("Widget"), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Repo(_)));
    }
}

use crate::domain::{
    requests::{CreateProductRequest, QuantityRequest},
    response::{CreateResult, OperationResult, ProductResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn reserve(&self, req: &QuantityRequest) -> Result<OperationResult, ServiceError>;
    async fn ship(&self, req: &QuantityRequest) -> Result<OperationResult, ServiceError>;
    async fn restock(&self, req: &QuantityRequest) -> Result<OperationResult, ServiceError>;
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<CreateResult<ProductResponse>, ServiceError>;
}

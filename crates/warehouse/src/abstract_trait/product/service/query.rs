use crate::domain::response::ProductResponse;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductResponse>, ServiceError>;
    async fn find_in_stock(&self) -> Result<Vec<ProductResponse>, ServiceError>;
}

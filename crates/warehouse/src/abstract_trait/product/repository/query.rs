use crate::model::product::Product as ProductModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

/// Predicate over product fields that every store can evaluate, either in
/// memory through [`ProductFilter::matches`] or translated to SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    /// `in_stock_quantity > 0 && in_stock_quantity > reserved_quantity`
    InStock,
    /// Case-sensitive `name.starts_with(prefix)`.
    NamePrefix(String),
}

impl ProductFilter {
    pub fn matches(&self, product: &ProductModel) -> bool {
        match self {
            ProductFilter::InStock => {
                product.in_stock_quantity > 0
                    && product.in_stock_quantity > product.reserved_quantity
            }
            ProductFilter::NamePrefix(prefix) => product.name.starts_with(prefix.as_str()),
        }
    }
}

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError>;
    async fn query(&self, filter: &ProductFilter) -> Result<Vec<ProductModel>, RepositoryError>;
}

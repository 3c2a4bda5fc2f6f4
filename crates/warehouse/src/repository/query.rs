use crate::{
    abstract_trait::product::repository::{ProductFilter, ProductQueryRepositoryTrait},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, in_stock_quantity, reserved_quantity
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(product)
    }

    async fn query(&self, filter: &ProductFilter) -> Result<Vec<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let rows = match filter {
            ProductFilter::InStock => {
                sqlx::query_as::<_, ProductModel>(
                    r#"
                    SELECT id, name, in_stock_quantity, reserved_quantity
                    FROM products
                    WHERE in_stock_quantity > 0
                      AND in_stock_quantity > reserved_quantity
                    ORDER BY id
                    "#,
                )
                .fetch_all(&mut *conn)
                .await
            }
            ProductFilter::NamePrefix(prefix) => {
                sqlx::query_as::<_, ProductModel>(
                    r#"
                    SELECT id, name, in_stock_quantity, reserved_quantity
                    FROM products
                    WHERE left(name, char_length($1)) = $1
                    ORDER BY id
                    "#,
                )
                .bind(prefix)
                .fetch_all(&mut *conn)
                .await
            }
        }
        .map_err(|e| {
            error!("❌ Failed to query products ({filter:?}): {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("🔍 {filter:?} matched {} products", rows.len());
        Ok(rows)
    }
}

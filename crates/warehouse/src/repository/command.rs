use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    model::product::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::Error as SqlxError;
use tracing::{error, info, warn};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn is_unique_violation(err: &SqlxError) -> bool {
    matches!(err, SqlxError::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn insert(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, in_stock_quantity, reserved_quantity)
            VALUES ($1, $2, $3)
            RETURNING id, name, in_stock_quantity, reserved_quantity
            "#,
        )
        .bind(&product.name)
        .bind(product.in_stock_quantity)
        .bind(product.reserved_quantity)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                warn!("⚠️ Product name '{}' was taken concurrently", product.name);
                return RepositoryError::Conflict(format!(
                    "product name '{}' already exists",
                    product.name
                ));
            }
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} ({})", result.id, result.name);
        Ok(result)
    }

    async fn update_quantities(
        &self,
        expected: &ProductModel,
        updated: &ProductModel,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET in_stock_quantity = $2,
                reserved_quantity = $3
            WHERE id = $1
              AND in_stock_quantity = $4
              AND reserved_quantity = $5
            RETURNING id, name, in_stock_quantity, reserved_quantity
            "#,
        )
        .bind(expected.id)
        .bind(updated.in_stock_quantity)
        .bind(updated.reserved_quantity)
        .bind(expected.in_stock_quantity)
        .bind(expected.reserved_quantity)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", expected.id, err);
            RepositoryError::from(err)
        })?;

        if let Some(product) = result {
            info!(
                "🔄 Updated product ID {} (in stock {}, reserved {})",
                product.id, product.in_stock_quantity, product.reserved_quantity
            );
            return Ok(product);
        }

        // nothing matched: either the row is gone or its counters moved
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE id = $1")
            .bind(expected.id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        match exists {
            Some(_) => {
                warn!("⚠️ Product ID {} changed since it was read", expected.id);
                Err(RepositoryError::Conflict(format!(
                    "product {} was modified concurrently",
                    expected.id
                )))
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

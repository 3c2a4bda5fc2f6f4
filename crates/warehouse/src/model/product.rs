use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub in_stock_quantity: i64,
    pub reserved_quantity: i64,
}

impl Product {
    /// Stock not yet reserved. Widened because `reserved_quantity` can be
    /// negative, which pushes the difference past `i64::MAX`.
    pub fn available_quantity(&self) -> i128 {
        i128::from(self.in_stock_quantity) - i128::from(self.reserved_quantity)
    }
}

/// A product that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub in_stock_quantity: i64,
    pub reserved_quantity: i64,
}

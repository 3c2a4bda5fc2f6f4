use crate::model::product::Product as ProductModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Great Product")]
    pub name: String,
    #[schema(example = 10)]
    pub in_stock_quantity: i64,
    #[schema(example = 0)]
    pub reserved_quantity: i64,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            in_stock_quantity: value.in_stock_quantity,
            reserved_quantity: value.reserved_quantity,
        }
    }
}

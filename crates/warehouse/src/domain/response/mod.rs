mod api;
mod product;

pub use self::api::{CreateResult, ErrorReason, OperationResult};
pub use self::product::ProductResponse;

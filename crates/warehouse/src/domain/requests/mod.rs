mod product;

pub use self::product::{CreateProductRequest, QuantityRequest};

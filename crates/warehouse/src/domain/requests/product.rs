use crate::domain::response::ErrorReason;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct QuantityRequest {
    #[schema(example = 1)]
    pub id: i64,

    #[validate(range(min = 1, code = "quantity_invalid"))]
    #[schema(example = 1)]
    pub quantity: i64,
}

impl QuantityRequest {
    pub fn check(&self) -> Result<(), ErrorReason> {
        self.validate().map_err(|errors| reason_for(&errors))
    }
}

/// Candidate product as posted to `/add`. `id` and `reservedQuantity` are
/// accepted for shape compatibility but never trusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProductRequest {
    pub id: Option<i64>,

    #[validate(range(min = 0, code = "quantity_invalid"))]
    #[schema(example = 10)]
    pub in_stock_quantity: i64,

    pub reserved_quantity: i64,

    #[validate(
        required(code = "invalid_request"),
        length(min = 1, code = "invalid_request")
    )]
    #[schema(example = "Great Product")]
    pub name: Option<String>,
}

impl CreateProductRequest {
    pub fn check(&self) -> Result<(), ErrorReason> {
        self.validate().map_err(|errors| reason_for(&errors))
    }
}

// A bad quantity is reported ahead of a bad name.
fn reason_for(errors: &ValidationErrors) -> ErrorReason {
    let quantity_invalid = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .any(|e| e.code == "quantity_invalid");

    if quantity_invalid {
        ErrorReason::QuantityInvalid
    } else {
        ErrorReason::InvalidRequest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_quantities_are_invalid() {
        for quantity in [0, -1, i64::MIN] {
            let req = QuantityRequest { id: 1, quantity };
            assert_eq!(req.check(), Err(ErrorReason::QuantityInvalid));
        }
        assert_eq!(QuantityRequest { id: 1, quantity: 1 }.check(), Ok(()));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let req: QuantityRequest = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(req.quantity, 0);
        assert_eq!(req.check(), Err(ErrorReason::QuantityInvalid));
    }

    #[test]
    fn create_rejects_negative_stock_before_name() {
        let req = CreateProductRequest {
            in_stock_quantity: -1,
            name: None,
            ..Default::default()
        };
        assert_eq!(req.check(), Err(ErrorReason::QuantityInvalid));
    }

    #[test]
    fn create_rejects_missing_or_empty_name() {
        let missing = CreateProductRequest::default();
        assert_eq!(missing.check(), Err(ErrorReason::InvalidRequest));

        let empty = CreateProductRequest {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty.check(), Err(ErrorReason::InvalidRequest));
    }

    #[test]
    fn create_accepts_whitespace_only_name() {
        let req = CreateProductRequest {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(req.check(), Ok(()));
    }

    #[test]
    fn create_request_uses_camel_case_fields() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"id": 1, "inStockQuantity": 3, "reservedQuantity": 2, "name": "Widget"}"#,
        )
        .unwrap();
        assert_eq!(req.in_stock_quantity, 3);
        assert_eq!(req.reserved_quantity, 2);
        assert_eq!(req.name.as_deref(), Some("Widget"));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Why an inventory operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ErrorReason {
    /// Requested quantity was zero or negative, or initial stock was negative.
    QuantityInvalid,
    /// Unknown product id, or a missing/empty name on create.
    InvalidRequest,
    /// The operation would push reserved stock past what is on hand.
    NotEnoughQuantity,
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorReason::QuantityInvalid => "QuantityInvalid",
            ErrorReason::InvalidRequest => "InvalidRequest",
            ErrorReason::NotEnoughQuantity => "NotEnoughQuantity",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_reason: Option<ErrorReason>,
}

impl OperationResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error_reason: None,
        }
    }

    pub fn failed(reason: ErrorReason) -> Self {
        Self {
            success: false,
            error_reason: Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_reason: Option<ErrorReason>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model: Option<T>,
}

impl<T> CreateResult<T> {
    pub fn created(model: T) -> Self {
        Self {
            success: true,
            error_reason: None,
            model: Some(model),
        }
    }

    pub fn failed(reason: ErrorReason) -> Self {
        Self {
            success: false,
            error_reason: Some(reason),
            model: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_envelope_carries_reason_name() {
        let body = serde_json::to_value(OperationResult::failed(ErrorReason::NotEnoughQuantity))
            .unwrap();
        assert_eq!(
            body,
            json!({"success": false, "errorReason": "NotEnoughQuantity"})
        );
    }

    #[test]
    fn success_envelope_omits_reason() {
        let body = serde_json::to_value(OperationResult::ok()).unwrap();
        assert_eq!(body, json!({"success": true}));
    }

    #[test]
    fn failed_create_has_no_model() {
        let body =
            serde_json::to_value(CreateResult::<u8>::failed(ErrorReason::InvalidRequest)).unwrap();
        assert_eq!(body, json!({"success": false, "errorReason": "InvalidRequest"}));
    }
}

//! Unified error types shared by the HTTP layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::FilterOperationKind;
use crate::fields::FieldPurpose;

/// Unified API error rendered in every error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// HTTP status code associated with the error code
    pub fn http_status_code(&self) -> u16 {
        match self.code.as_str() {
            "BAD_REQUEST" | "VALIDATION_ERROR" => 400,
            "NOT_FOUND" => 404,
            "METHOD_NOT_ALLOWED" => 405,
            "SERVICE_UNAVAILABLE" => 503,
            _ => 500,
        }
    }

    // Common error constructors

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn service_unavailable(reason: Option<&str>) -> Self {
        let message = reason.unwrap_or("Service temporarily unavailable");
        Self::new("SERVICE_UNAVAILABLE", message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let mut api_error = ApiError::validation_error(err.to_string());
        if let Some(field) = err.field() {
            api_error = api_error.with_details(serde_json::json!({ "field": field }));
        }
        api_error
    }
}

/// Rejection raised while turning a client request into a typed query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{field}' is not allowed for {purpose}")]
    FieldNotAllowed { field: String, purpose: FieldPurpose },

    #[error("Operation {operation} on '{field}' expects {expected}")]
    ValueShape {
        field: String,
        operation: FilterOperationKind,
        expected: &'static str,
    },

    #[error("Value {value} for '{field}' is not a valid {expected}")]
    ValueType {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("Operation {operation} is not supported on '{field}'")]
    UnsupportedOperation {
        field: String,
        operation: FilterOperationKind,
    },
}

impl ValidationError {
    /// Field the error refers to
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::UnknownField(field) => Some(field),
            ValidationError::FieldNotAllowed { field, .. }
            | ValidationError::ValueShape { field, .. }
            | ValidationError::ValueType { field, .. }
            | ValidationError::UnsupportedOperation { field, .. } => Some(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::validation_error("bad").http_status_code(), 400);
        assert_eq!(ApiError::new("NOT_FOUND", "Cannot GET /nope").http_status_code(), 404);
        assert_eq!(ApiError::service_unavailable(None).http_status_code(), 503);
        assert_eq!(ApiError::internal_error("boom").http_status_code(), 500);
    }

    #[test]
    fn test_from_validation_error() {
        let err = ValidationError::UnknownField("password".to_string());
        let api_error: ApiError = err.into();
        assert_eq!(api_error.code, "VALIDATION_ERROR");
        assert_eq!(api_error.message, "Unknown field 'password'");
        assert_eq!(api_error.details, Some(serde_json::json!({ "field": "password" })));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let json = serde_json::to_value(ApiError::internal_error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "INTERNAL_ERROR", "message": "nope" }));
    }
}

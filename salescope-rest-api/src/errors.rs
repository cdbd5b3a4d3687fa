//! REST API error type and its sanitized JSON rendering

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use salescope_api_types::{ApiError, ValidationError};
use salescope_interfaces::DatabaseError;
use serde_json::json;
use thiserror::Error;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Convert into the unified error body.
    ///
    /// Store failures are logged here and replaced by a generic message.
    pub fn into_api_error(self) -> ApiError {
        match self {
            RestError::Database(DatabaseError::Validation(err)) | RestError::Validation(err) => err.into(),
            RestError::Database(err) => {
                tracing::error!(error = %err, "Store query failed");
                if err.is_unavailable() {
                    ApiError::service_unavailable(Some("Sales data is temporarily unavailable"))
                } else {
                    ApiError::internal_error("Failed to read sales data")
                }
            }
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let unified_error = self.into_api_error();
        let status =
            StatusCode::from_u16(unified_error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut error_response = json!({
            "error": {
                "code": unified_error.code,
                "message": unified_error.message,
                "status": status.as_u16()
            }
        });

        if let Some(field) = unified_error.details.as_ref().and_then(|details| details.get("field")) {
            error_response["error"]["field"] = field.clone();
        }

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_sanitized() {
        let api = RestError::from(DatabaseError::Internal {
            message: "no such column: sales.secret".to_string(),
        })
        .into_api_error();
        assert_eq!(api.code, "INTERNAL_ERROR");
        assert!(!api.message.contains("secret"));

        let api = RestError::from(DatabaseError::Connection {
            message: "pool timed out".to_string(),
        })
        .into_api_error();
        assert_eq!(api.http_status_code(), 503);
    }

    #[test]
    fn test_validation_keeps_field() {
        let api = RestError::from(DatabaseError::Validation(ValidationError::UnknownField(
            "password".to_string(),
        )))
        .into_api_error();
        assert_eq!(api.code, "VALIDATION_ERROR");
        assert_eq!(api.details, Some(json!({ "field": "password" })));
    }

    #[test]
    fn test_status_codes() {
        let response = RestError::from(ValidationError::UnknownField("colour".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = RestError::from(DatabaseError::Transaction {
            message: "deadlock".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = RestError::from(DatabaseError::Connection {
            message: "refused".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

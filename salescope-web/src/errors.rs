//! Web-specific error types and conversions
//!
//! Every error leaves the server as
//! `{ "error": { "code", "message", "status" } }`. Internal errors are
//! logged in full and rendered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use salescope_api_types::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Web-specific error type for HTTP API operations
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Method not allowed: {message}")]
    MethodNotAllowed { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl WebError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } | WebError::Validation { .. } => StatusCode::BAD_REQUEST,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::BadRequest { .. } => "BAD_REQUEST",
            WebError::NotFound { .. } => "NOT_FOUND",
            WebError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            WebError::Internal { .. } => "INTERNAL_ERROR",
            WebError::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    /// Message that is safe to show to clients
    pub fn public_message(&self) -> String {
        match self {
            WebError::BadRequest { message }
            | WebError::NotFound { message }
            | WebError::MethodNotAllowed { message }
            | WebError::Validation { message, .. } => message.clone(),
            WebError::Internal { .. } => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let WebError::Internal { message } = &self {
            tracing::error!(error = %message, "Internal error while handling request");
        }

        let mut body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
                "status": status.as_u16()
            }
        });

        if let WebError::Validation { field: Some(field), .. } = &self {
            body["error"]["field"] = json!(field);
        }

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for WebError {
    fn from(err: ValidationError) -> Self {
        WebError::Validation {
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

// Common error constructors
impl WebError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }

    pub fn validation(field: Option<String>, message: impl Into<String>) -> Self {
        WebError::Validation {
            message: message.into(),
            field,
        }
    }
}

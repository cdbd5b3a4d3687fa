use axum::{
    extract::{OriginalUri, Request},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::WebError;

/// Log every response that leaves with a server error status
pub async fn error_handler_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), "Request failed with server error");
    } else if status.is_client_error() {
        tracing::debug!(%method, %path, status = status.as_u16(), "Request rejected");
    }

    response
}

/// Fallback for unknown routes, naming the path as the client sent it
pub async fn handle_not_found(method: Method, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    WebError::not_found(format!("Cannot {method} {}", uri.path()))
}

/// Fallback for known routes hit with the wrong method
pub async fn handle_method_not_allowed() -> impl IntoResponse {
    WebError::MethodNotAllowed {
        message: "Method not allowed".to_string(),
    }
}

//! # SaleScope Web Utilities
//!
//! Reusable pieces for the HTTP layer: the JSON error envelope, a JSON body
//! extractor that reports malformed input as a validation error, and the
//! CORS, request-id and error-logging middleware.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use salescope_config::CorsConfig;
//! use salescope_web::middleware::{cors_layer, error_handler_middleware, handle_not_found, request_id_middleware};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let app: Router = Router::new()
//!     .route("/health", get(|| async { "ok" }))
//!     .fallback(handle_not_found)
//!     .layer(middleware::from_fn(error_handler_middleware))
//!     .layer(middleware::from_fn(request_id_middleware))
//!     .layer(cors_layer(&CorsConfig::default()));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

pub mod errors;
pub mod extractors;
pub mod middleware;

// Re-export commonly used types and functions
pub use errors::{WebError, WebResult};
pub use extractors::ValidatedJson;
pub use middleware::{
    cors_layer, error_handler_middleware, handle_method_not_allowed, handle_not_found, request_id_middleware,
    RequestId, REQUEST_ID_HEADER,
};

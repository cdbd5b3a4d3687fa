//! Router construction and middleware stack

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use salescope_config::{CorsConfig, ServerConfig};
use salescope_web::{
    cors_layer, error_handler_middleware, handle_method_not_allowed, handle_not_found, request_id_middleware,
};
use tower_http::trace::TraceLayer;

use crate::{context::SalesContext, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix
    pub api_prefix: String,
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api".to_string(),
            cors: CorsConfig::default(),
        }
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            enable_request_id: server.enable_request_id,
            api_prefix: server.api_prefix.clone(),
            cors: server.cors.clone(),
            ..Default::default()
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: SalesContext, config: AppConfig) -> Router {
    let prefix = config.api_prefix.trim_end_matches('/');

    let app = Router::new()
        // Health endpoints (no prefix)
        .route("/health", get(handlers::health_check))
        .route("/health/detailed", get(handlers::health_check_detailed))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check));

    let app = if prefix.is_empty() {
        app.merge(create_api_router())
    } else {
        app.nest(prefix, create_api_router())
    };

    // Layers wrap everything added before them
    let mut app = app
        .fallback(handle_not_found)
        .with_state(context)
        .layer(middleware::from_fn(error_handler_middleware));

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    if config.enable_cors {
        app = app.layer(cors_layer(&config.cors));
    }

    app
}

fn create_api_router() -> Router<SalesContext> {
    Router::new()
        .route(
            "/sales",
            post(handlers::query_sales).fallback(handle_method_not_allowed),
        )
        .route(
            "/sales/filters",
            get(handlers::filter_options).fallback(handle_method_not_allowed),
        )
        .route(
            "/sales/stats",
            post(handlers::sales_stats).fallback(handle_method_not_allowed),
        )
}

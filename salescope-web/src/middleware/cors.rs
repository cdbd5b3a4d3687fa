use axum::http::{HeaderName, HeaderValue, Method};
use salescope_config::CorsConfig;
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer for the dashboard origins.
///
/// Unparseable origins, methods and headers are skipped with a warning.
/// A wildcard origin disables credentials since browsers reject the pair.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    let wildcard = config.allowed_origins.iter().any(|origin| origin == "*");
    if wildcard {
        tracing::warn!("CORS configured to allow any origin");
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "Skipping invalid CORS origin");
                    None
                }
            })
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();
    cors = cors.allow_headers(headers);

    if config.allow_credentials && !wildcard {
        cors = cors.allow_credentials(true);
    }

    cors.max_age(config.max_age)
}

//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use salescope_interfaces::Repository;
use serde_json::json;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};

use crate::{
    context::SalesContext,
    models::common::{HealthCheckResult, HealthResponse, HealthStatus},
};

/// Liveness of the process itself; never touches the store
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// Health including a round trip to the database
pub async fn health_check_detailed(State(ctx): State<SalesContext>) -> impl IntoResponse {
    info!("Detailed health check requested");

    let started = Instant::now();
    let database = match ctx.sales.health_check().await {
        Ok(()) => HealthCheckResult {
            status: HealthStatus::Healthy,
            message: Some("Database connection healthy".to_string()),
            duration_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            HealthCheckResult {
                status: HealthStatus::Unhealthy,
                message: Some("Database connection failed".to_string()),
                duration_ms: Some(started.elapsed().as_millis() as u64),
            }
        }
    };

    let response = HealthResponse::healthy().with_checks(HashMap::from([("database".to_string(), database)]));
    let status = match response.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    (status, Json(response))
}

/// Readiness check: 200 once the database answers, 503 otherwise
pub async fn readiness_check(State(ctx): State<SalesContext>) -> impl IntoResponse {
    match ctx.sales.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "ready": true,
                "checks": { "database": { "ready": true } }
            })),
        ),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "ready": false,
                    "checks": { "database": { "ready": false, "message": "Database not ready" } }
                })),
            )
        }
    }
}

/// Liveness check
pub async fn liveness_check() -> impl IntoResponse {
    Json(json!({ "alive": true }))
}

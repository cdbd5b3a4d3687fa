//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::Router;
use salescope_config::SaleScopeConfig;
use salescope_rest_api::{create_rest_app, AppConfig, SalesContext};
use salescope_storage::{DatabaseConfig, DatabaseConnection, SeaOrmSaleRepository};
use std::sync::Arc;

/// Server application struct
pub struct Server {
    config: SaleScopeConfig,
    database: DatabaseConnection,
}

impl Server {
    /// Open the database pool and bring the schema up to date
    pub async fn new(config: SaleScopeConfig) -> Result<Self> {
        let database = DatabaseConnection::new(DatabaseConfig::from(&config.database))
            .await
            .context("Failed to connect to the database")?;

        if config.database.auto_migrate {
            database.migrate().await.context("Failed to run database migrations")?;
        }

        Ok(Self { config, database })
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        let repository = SeaOrmSaleRepository::new(self.database.clone());
        let context = SalesContext::new(Arc::new(repository), self.config.query.clone());

        create_rest_app(context, AppConfig::from(&self.config.server))
    }

    /// Serve until Ctrl-C or SIGTERM, then close the pool
    pub async fn start(self) -> Result<()> {
        let app = self.build_app();
        let addr = format!("{}:{}", self.config.server.bind_address, self.config.server.port);

        self.log_config_summary();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("SaleScope API listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        self.database.close().await.context("Failed to close the database pool")?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn log_config_summary(&self) {
        let server = &self.config.server;
        tracing::info!(
            api_prefix = %server.api_prefix,
            request_id = server.enable_request_id,
            origins = ?server.cors.allowed_origins,
            max_page_size = self.config.query.max_page_size,
            "Server configuration"
        );
    }
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn in_memory_config() -> SaleScopeConfig {
        let mut config = SaleScopeConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config
    }

    #[tokio::test]
    async fn test_app_serves_empty_store() {
        let server = Server::new(in_memory_config()).await.unwrap();
        let client = TestServer::new(server.build_app()).unwrap();

        let body: Value = client.post("/api/sales").json(&json!({})).await.json();
        assert_eq!(body["totalElements"], 0);
        assert_eq!(body["totalPages"], 0);
        assert_eq!(body["data"], json!([]));

        let options: Value = client.get("/api/sales/filters").await.json();
        assert_eq!(options["ageRange"], json!({ "min": 0, "max": 100 }));

        client.get("/ready").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let mut config = in_memory_config();
        config.server.api_prefix = "/v2".to_string();

        let server = Server::new(config).await.unwrap();
        let client = TestServer::new(server.build_app()).unwrap();

        client.get("/v2/sales/filters").await.assert_status_ok();
        client
            .get("/api/sales/filters")
            .await
            .assert_status(axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unreachable_database_fails_startup() {
        let mut config = in_memory_config();
        config.database.url = "postgres://nobody@127.0.0.1:1/salescope".to_string();
        config.database.connection_timeout = std::time::Duration::from_millis(200);

        assert!(Server::new(config).await.is_err());
    }
}

use super::config::DatabaseConfig;
use salescope_api_types::ValidationError;
use salescope_config::DatabaseBackend;
use sea_orm::{ConnectOptions, Database, DatabaseConnection as SeaConnection, DbErr};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Database connection wrapper with configuration
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: SeaConnection,
    config: DatabaseConfig,
}

/// Database-related errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    DbError(#[from] DbErr),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
}

impl DatabaseConnection {
    /// Open the pool described by `config`
    pub async fn new(config: DatabaseConfig) -> Result<Self, DatabaseError> {
        info!(backend = ?config.backend(), "Connecting to database");

        Self::prepare_sqlite_file(&config.url)?;

        let mut opts = ConnectOptions::new(Self::connection_url(&config.url));
        opts.connect_timeout(config.connection_timeout)
            .acquire_timeout(config.connection_timeout)
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        if config.is_in_memory() {
            // Each pooled connection would open its own empty in-memory database
            opts.max_connections(1).min_connections(1);
        } else {
            opts.max_connections(config.max_connections)
                .min_connections(config.min_connections.min(config.max_connections))
                .idle_timeout(config.idle_timeout)
                .max_lifetime(config.max_lifetime);
        }

        let connection = Database::connect(opts).await?;

        debug!(max_connections = config.max_connections, "Database connection established");

        Ok(Self { connection, config })
    }

    /// Append `mode=rwc` to file-backed SQLite URLs so a missing file is created
    fn connection_url(database_url: &str) -> String {
        if sqlite_file_path(database_url).is_none() || database_url.contains("mode=") {
            return database_url.to_string();
        }

        let separator = if database_url.contains('?') { '&' } else { '?' };
        format!("{database_url}{separator}mode=rwc")
    }

    /// Create the parent directory of a file-backed SQLite database
    fn prepare_sqlite_file(database_url: &str) -> Result<(), DatabaseError> {
        let Some(file_path) = sqlite_file_path(database_url) else {
            return Ok(());
        };
        if file_path.is_empty() {
            return Err(DatabaseError::ConfigError(format!(
                "SQLite URL has no file path: {database_url}"
            )));
        }

        let path = Path::new(file_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
            info!(directory = %parent.display(), "Creating database directory");
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::ConfigError(format!("Failed to create database directory {}: {e}", parent.display()))
            })?;
        }

        debug!(path = %path.display(), exists = path.exists(), "Using SQLite database file");
        Ok(())
    }

    /// Get the underlying Sea-ORM connection
    pub fn get_connection(&self) -> &SeaConnection {
        &self.connection
    }

    /// Get database configuration
    pub fn get_config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        use sea_orm_migration::MigratorTrait;

        info!("Running database migrations");

        super::migrations::Migrator::up(&self.connection, None)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Check database connectivity
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        match self.connection.ping().await {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!("Database ping failed: {}", e);
                Err(DatabaseError::DbError(e))
            }
        }
    }

    /// Close the pool
    pub async fn close(self) -> Result<(), DatabaseError> {
        info!("Closing database connection");
        self.connection.close().await?;
        debug!("Database connection closed");
        Ok(())
    }
}

/// File path of a file-backed SQLite URL; `None` for in-memory or other backends
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    if DatabaseBackend::from_url(database_url) != Some(DatabaseBackend::Sqlite)
        || database_url.contains(":memory:")
        || database_url.contains("mode=memory")
    {
        return None;
    }

    let without_scheme = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    without_scheme.split('?').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_connection_url() {
        assert_eq!(DatabaseConnection::connection_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            DatabaseConnection::connection_url("sqlite://data/sales.db"),
            "sqlite://data/sales.db?mode=rwc"
        );
        assert_eq!(
            DatabaseConnection::connection_url("sqlite://sales.db?cache=shared"),
            "sqlite://sales.db?cache=shared&mode=rwc"
        );
        assert_eq!(
            DatabaseConnection::connection_url("sqlite://sales.db?mode=ro"),
            "sqlite://sales.db?mode=ro"
        );
        assert_eq!(
            DatabaseConnection::connection_url("postgres://localhost/sales"),
            "postgres://localhost/sales"
        );
    }

    #[tokio::test]
    async fn test_in_memory_connection_and_migrations() {
        let db = DatabaseConnection::new(DatabaseConfig::in_memory()).await.unwrap();
        db.migrate().await.unwrap();
        db.ping().await.unwrap();

        // Migrations are idempotent
        db.migrate().await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_database_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("sales.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 2,
            connection_timeout: Duration::from_secs(5),
            ..Default::default()
        };

        let db = DatabaseConnection::new(config).await.unwrap();
        db.migrate().await.unwrap();
        assert!(db_path.exists());
        assert_eq!(db.get_config().max_connections, 2);
        db.close().await.unwrap();
    }

    #[test]
    fn test_sqlite_url_without_path_rejected() {
        let err = DatabaseConnection::prepare_sqlite_file("sqlite://").unwrap_err();
        assert!(matches!(err, DatabaseError::ConfigError(_)));
    }

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(sqlite_file_path("sqlite://data/sales.db?mode=rwc"), Some("data/sales.db"));
        assert_eq!(sqlite_file_path("sqlite:sales.db"), Some("sales.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/sales"), None);
    }
}

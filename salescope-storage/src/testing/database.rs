//! Isolated test databases with automatic cleanup

use salescope_api_types::Sale;
use std::time::Duration;
use tempfile::TempDir;

use crate::seaorm::{insert_sales, DatabaseConfig, DatabaseConnection, SeaOrmSaleRepository};

/// Migrated SQLite database that lives as long as this value
pub struct TestDatabase {
    temp_dir: TempDir,
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// File-backed database in a fresh temp directory.
    ///
    /// A file is used rather than `:memory:` so that every pooled connection
    /// sees the same data.
    pub async fn new() -> Result<Self, TestDatabaseError> {
        let temp_dir = TempDir::new().map_err(|e| TestDatabaseError::TempDirCreation(e.to_string()))?;
        let db_path = temp_dir.path().join("test.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", db_path.display()),
            max_connections: 4,
            connection_timeout: Duration::from_secs(5),
            ..Default::default()
        };

        let connection = DatabaseConnection::new(config)
            .await
            .map_err(|e| TestDatabaseError::Connection(e.to_string()))?;
        connection
            .migrate()
            .await
            .map_err(|e| TestDatabaseError::Migration(e.to_string()))?;

        Ok(Self {
            temp_dir,
            connection,
        })
    }

    /// Repository sharing this database's pool
    pub fn repository(&self) -> SeaOrmSaleRepository {
        SeaOrmSaleRepository::new(self.connection.clone())
    }

    /// Insert sales and their tags
    pub async fn seed_sales(&self, sales: Vec<Sale>) -> Result<(), TestDatabaseError> {
        insert_sales(self.connection.get_connection(), &sales)
            .await
            .map_err(|e| TestDatabaseError::Seeding(e.to_string()))
    }

    /// Path of the temp directory, for tests that need scratch files next to the database
    pub fn temp_path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}

/// Test database errors
#[derive(Debug, thiserror::Error)]
pub enum TestDatabaseError {
    #[error("Failed to create temporary directory: {0}")]
    TempDirCreation(String),

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Seeding failed: {0}")]
    Seeding(String),
}

use salescope_config::DatabaseBackend;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pool settings for the SeaORM connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    pub min_connections: u32,

    /// Connect and acquire timeout
    pub connection_timeout: Duration,

    pub idle_timeout: Duration,

    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    /// Configuration for a private in-memory SQLite database
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        }
    }

    pub fn backend(&self) -> Option<DatabaseBackend> {
        DatabaseBackend::from_url(&self.url)
    }

    /// Whether the URL points at an in-memory SQLite database
    pub fn is_in_memory(&self) -> bool {
        self.backend() == Some(DatabaseBackend::Sqlite)
            && (self.url.contains(":memory:") || self.url.contains("mode=memory"))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://salescope.db".to_string(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }
}

impl From<&salescope_config::DatabaseConfig> for DatabaseConfig {
    fn from(config: &salescope_config::DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            connection_timeout: config.connection_timeout,
            idle_timeout: config.idle_timeout,
            max_lifetime: config.max_lifetime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_app_config() {
        let app = salescope_config::DatabaseConfig {
            url: "sqlite://data/sales.db".to_string(),
            max_connections: 4,
            ..Default::default()
        };
        let config = DatabaseConfig::from(&app);
        assert_eq!(config.url, "sqlite://data/sales.db");
        assert_eq!(config.max_connections, 4);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_in_memory() {
        let config = DatabaseConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
        assert!(DatabaseConfig {
            url: "sqlite://file:shared?mode=memory&cache=shared".to_string(),
            ..Default::default()
        }
        .is_in_memory());
    }
}

//! Domain-driven configuration management for SaleScope
//!
//! Configuration is split by functional domain (server, database, logging,
//! query, import), each with serde defaults and its own validation. Values
//! come from an optional YAML file and `SALESCOPE_*` environment overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    database::{DatabaseBackend, DatabaseConfig},
    import::ImportConfig,
    logging::{LogFormat, LogLevel, LogRotation, LogTarget, LoggingConfig},
    query::QueryConfig,
    server::{CorsConfig, ServerConfig},
    SaleScopeConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;

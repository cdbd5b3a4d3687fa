//! Tracing subscriber setup for SaleScope
//!
//! Builds a `tracing-subscriber` registry from [`LoggingConfig`]: one
//! formatted layer per configured target (console or rolling file), a global
//! `EnvFilter` from `RUST_LOG` or the configured level, and optional per-target
//! level filters.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, LoggingGuard};

pub use salescope_config::LoggingConfig;

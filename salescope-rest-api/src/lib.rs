//! # SaleScope REST API
//!
//! HTTP endpoints for the sales dashboard: the paginated query builder, the
//! filter option lists, aggregate statistics and the health checks.
//!
//! ## Architecture
//!
//! Handlers depend on the `SaleRepository` trait from `salescope-interfaces`
//! through [`SalesContext`], so the router can be driven by the SeaORM
//! repository in production and by any other implementation in tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use salescope_rest_api::{create_rest_app, AppConfig, SalesContext};
//! use salescope_interfaces::SaleRepository;
//! use std::sync::Arc;
//!
//! # async fn example(repository: Arc<dyn SaleRepository>) -> Result<(), Box<dyn std::error::Error>> {
//! let context = SalesContext::new(repository, Default::default());
//! let app = create_rest_app(context, AppConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;

// Re-export commonly used types
pub use app::{create_rest_app, AppConfig};
pub use context::SalesContext;
pub use errors::{RestError, RestResult};
pub use models::*;

//! Shared state handed to every handler

use salescope_config::QueryConfig;
use salescope_interfaces::SaleRepository;
use std::sync::Arc;

/// Context for the sales and health endpoints
///
/// Holds the injected repository and the page size limits applied at the
/// HTTP boundary.
#[derive(Clone)]
pub struct SalesContext {
    /// Store behind every query
    pub sales: Arc<dyn SaleRepository>,
    /// Page size defaults and cap
    pub limits: QueryConfig,
}

impl SalesContext {
    pub fn new(sales: Arc<dyn SaleRepository>, limits: QueryConfig) -> Self {
        Self { sales, limits }
    }
}

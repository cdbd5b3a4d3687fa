//! Database repository interfaces

use async_trait::async_trait;
use salescope_api_types::{
    FilterOptions, QueryBuilderRequest, QueryBuilderResponse, Sale, SalesStats, ValidationError,
};

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Transaction error: {message}")]
    Transaction { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    /// Whether the store could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DatabaseError::Connection { .. })
    }
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check if the repository is healthy and can serve requests
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Read-only access to the sales table
#[async_trait]
pub trait SaleRepository: Repository {
    /// Run a search/filter/sort/paginate query.
    ///
    /// The count and the page fetch are independent reads.
    async fn query_sales(&self, request: &QueryBuilderRequest) -> Result<QueryBuilderResponse<Sale>, DatabaseError>;

    /// Distinct values for each categorical filter plus the age bounds
    async fn filter_options(&self) -> Result<FilterOptions, DatabaseError>;

    /// Aggregate totals over the records matching the request's filters and search.
    /// Pagination and sort fields are ignored.
    async fn sales_stats(&self, request: &QueryBuilderRequest) -> Result<SalesStats, DatabaseError>;
}

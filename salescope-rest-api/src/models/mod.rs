pub mod common;
pub mod sales;

pub use common::{HealthCheckResult, HealthResponse, HealthStatus};
pub use sales::{FiltersInput, SalesQueryRequest, SalesStatsRequest};

pub mod health;
pub mod sales;

pub use health::{health_check, health_check_detailed, liveness_check, readiness_check};
pub use sales::{filter_options, query_sales, sales_stats};

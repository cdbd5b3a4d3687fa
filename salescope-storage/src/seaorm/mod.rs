//! SeaORM implementation of the SaleScope store
//!
//! Entities, migrations, connection management and the repository that
//! implements the `salescope-interfaces` traits.

pub mod config;
pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod safe_errors;

pub use config::DatabaseConfig;
pub use connection::{DatabaseConnection, DatabaseError};
pub use entities::*;
pub use repositories::{clear_sales, insert_sales, SeaOrmSaleRepository};
pub use safe_errors::to_interface_error;

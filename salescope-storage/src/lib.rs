//! Storage layer for SaleScope
//!
//! This crate owns everything that touches the database: SeaORM entities and
//! migrations, the translation of a [`QueryBuilderRequest`] into a SQL
//! predicate, the count/fetch executor, the repository behind the
//! `SaleRepository` trait, and the CSV importer used to seed the store.
//!
//! [`QueryBuilderRequest`]: salescope_api_types::QueryBuilderRequest

pub mod import;
pub mod query;
pub mod seaorm;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use import::{CsvImporter, ImportError, ImportSummary};
pub use query::{build_condition, SalesQuery};
pub use seaorm::{DatabaseConfig, DatabaseConnection, DatabaseError, SeaOrmSaleRepository};

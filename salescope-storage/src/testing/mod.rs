//! Testing utilities for salescope-storage
//!
//! - `TestDatabase` - isolated, migrated SQLite database in a temp directory
//! - `SaleBuilder` - builder for individual sale fixtures
//! - `factories` - deterministic bulk fixtures
//!
//! Enable with the `testing` feature:
//!
//! ```toml
//! [dev-dependencies]
//! salescope-storage = { path = "../salescope-storage", features = ["testing"] }
//! ```

pub mod builders;
pub mod database;

pub use builders::{factories, SaleBuilder};
pub use database::{TestDatabase, TestDatabaseError};

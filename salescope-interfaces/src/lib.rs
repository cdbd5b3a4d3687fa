//! # SaleScope Interfaces
//!
//! Repository traits that sit between the storage crate and the HTTP layer.
//! Handlers depend on [`SaleRepository`] only, so the store handle can be
//! swapped for a different backend or a test double.

pub mod database;

// Re-export commonly used types
pub use database::{DatabaseError, Repository, SaleRepository};

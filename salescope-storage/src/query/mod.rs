//! Translation of query-builder requests into SQL
//!
//! [`build_condition`] turns the search term and the typed filters into a
//! single SeaORM [`Condition`](sea_orm::Condition); [`SalesQuery`] runs the
//! count and the page fetch against it.

pub mod executor;
pub mod predicate;

pub use executor::{SalesPage, SalesQuery};
pub use predicate::{build_condition, escape_like, glob_contains_pattern, sort_column};

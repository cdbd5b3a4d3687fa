//! Shared API types for the SaleScope query API
//!
//! This crate holds the vocabulary used on both sides of the query builder:
//! the filter operations and sort directions accepted over the wire, the
//! allow-listed sale fields, the typed filter model the storage layer
//! translates into SQL, and the page envelope returned to clients.

pub mod conversions;
pub mod domain;
pub mod enums;
pub mod errors;
pub mod fields;
pub mod pagination;
pub mod query;

// Re-export main types for convenience
pub use domain::{AgeBounds, AgeRange, DateRange, FilterOptions, Sale, SaleFilters, SalesStats};
pub use enums::{FilterOperationKind, SortDirection};
pub use errors::{ApiError, ValidationError};
pub use fields::{FieldKind, FieldPurpose, SaleField};
pub use pagination::{PageWindow, QueryBuilderResponse};
pub use query::{Filter, FilterCondition, FilterValue, QueryBuilderRequest, QueryFilter};

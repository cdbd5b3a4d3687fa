//! Sanitizing store errors before they cross the repository boundary
//!
//! The full error is logged here; callers only see a generic message that
//! never echoes SQL or driver details.

use salescope_interfaces::DatabaseError as InterfaceError;
use sea_orm::DbErr;

use super::connection::DatabaseError;

/// Map a storage error to the interface-level error, logging the original
pub fn to_interface_error(err: DatabaseError) -> InterfaceError {
    match err {
        DatabaseError::DbError(db_err) => from_db_err(db_err),
        DatabaseError::ValidationError(validation) => {
            tracing::warn!(error = %validation, "Input validation failed");
            InterfaceError::Validation(validation)
        }
        DatabaseError::MigrationError(msg) => {
            tracing::error!(error = %msg, "Migration error");
            InterfaceError::Internal {
                message: "Database migration failed".to_string(),
            }
        }
        DatabaseError::ConfigError(msg) => {
            tracing::error!(error = %msg, "Database configuration error");
            InterfaceError::Connection {
                message: "Database configuration error".to_string(),
            }
        }
    }
}

fn from_db_err(err: DbErr) -> InterfaceError {
    let unavailable = matches!(err, DbErr::ConnectionAcquire(_) | DbErr::Conn(_));

    tracing::error!(
        error = %err,
        unavailable,
        "Database error occurred"
    );

    if unavailable {
        InterfaceError::Connection {
            message: "Database connection unavailable".to_string(),
        }
    } else {
        InterfaceError::Internal {
            message: "Database operation failed".to_string(),
        }
    }
}

impl From<DatabaseError> for InterfaceError {
    fn from(err: DatabaseError) -> Self {
        to_interface_error(err)
    }
}

//! Database error types.

use invitation_core::{InvitationStatus, StoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Record failed required-field validation
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Status write out of a settled status
    #[error("invitation {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: InvitationStatus,
        to: InvitationStatus,
    },

    /// A stored column holds a value outside its domain
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { id, .. } => StoreError::NotFound(id),
            DatabaseError::Validation(err) => StoreError::Validation(err),
            DatabaseError::InvalidTransition { id, from, to } => {
                StoreError::InvalidTransition { id, from, to }
            }
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) => {
                StoreError::Unavailable("connection pool timed out".to_string())
            }
            other => StoreError::backend(other),
        }
    }
}

//! Error types for store operations.

use thiserror::Error;

use crate::record::InvitationStatus;
use crate::validation::ValidationError;

/// Errors that can occur while reading or writing invitation records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the given id.
    #[error("invitation not found: {0}")]
    NotFound(String),

    /// The record failed required-field validation.
    #[error("invalid invitation: {0}")]
    Validation(#[from] ValidationError),

    /// A status write would move a settled invitation to another status.
    #[error("invitation {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: InvitationStatus,
        to: InvitationStatus,
    },

    /// The backend is temporarily unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Wrap an arbitrary backend error.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

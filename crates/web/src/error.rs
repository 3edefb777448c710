//! Error types for the web server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use invitation_core::{StoreError, ValidationError};
use invitation_flow::FlowError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum WebError {
    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Sender input failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The command is not available in the session's current step.
    #[error("{0}")]
    Flow(#[from] FlowError),

    /// No invitation has this id.
    #[error("Invitation not found: {0}")]
    InvitationNotFound(String),

    /// No live session has this id.
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            WebError::Validation(_) | WebError::Store(StoreError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            WebError::InvitationNotFound(_)
            | WebError::SessionNotFound(_)
            | WebError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            WebError::Flow(_) | WebError::Store(StoreError::InvalidTransition { .. }) => {
                StatusCode::CONFLICT
            }
            WebError::Store(_) | WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for request handlers.
pub type Result<T> = std::result::Result<T, WebError>;

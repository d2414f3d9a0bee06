//! Unified service error type
//!
//! `AppError` is the caller-facing error taxonomy: validation problems and
//! an empty resolution reject the request up front (400), storage failures
//! surface as the group outcome (500). Credential and dispatch failures are
//! recovered per-recipient inside the fan-out loop and normally never reach
//! a response; the variants exist so the push layer can propagate with `?`.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::db::repository::RepoError;
use crate::push::credentials::CredentialError;
use crate::push::fcm::DispatchError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request fields, rejected before any write
    #[error("{0}")]
    Validation(String),

    /// No supplied waiter id resolved to a staff record
    #[error("No valid waiters found")]
    NoValidWaiters,

    /// Token exchange failed for one recipient's dispatch attempt
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Push send failed or the endpoint returned non-success
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Storage read/write failure, surfaced as a group-level failure
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// HTTP status for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::NoValidWaiters => StatusCode::BAD_REQUEST,
            AppError::Credential(_)
            | AppError::Dispatch(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "repository error");
        AppError::Database(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        // Client errors keep the booking route's wire shape: no booking was
        // created, so bookingId is explicitly null next to the message.
        let body = if status.is_client_error() {
            json!({ "error": self.to_string(), "bookingId": null })
        } else {
            json!({ "error": self.to_string() })
        };
        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for handler results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::validation("Missing required field: date");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn no_valid_waiters_has_fixed_message() {
        let err = AppError::NoValidWaiters;
        assert_eq!(err.to_string(), "No valid waiters found");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_maps_to_internal_server_error() {
        let err = AppError::database("write failed");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn repo_error_converts_to_database() {
        let err: AppError = RepoError::Database("boom".into()).into();
        assert!(matches!(err, AppError::Database(_)));
    }
}

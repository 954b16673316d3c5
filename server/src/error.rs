//! Error types for the client service and their HTTP mapping.
//!
//! # Design
//! `NotFound` is the one error the API layer produces on purpose; it carries
//! the id so the response message can name it. Validation failures map to
//! 422. Anything raised by the store is opaque to callers and becomes a 500
//! with a generic message; the underlying cause is only logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::model::ClientId;

/// Input rejected before it reaches persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required and must not be blank")]
    MissingName,
    #[error("id {0} must not be supplied when creating a client")]
    IdNotAllowed(ClientId),
}

/// Failures raised by a `ClientStore` backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("store lock poisoned")]
    Poisoned,
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by `ClientService` and the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("client {id} not found")]
    NotFound { id: ClientId },
    #[error(transparent)]
    Validation(ValidationError),
    #[error(transparent)]
    Store(StoreError),
    #[error("{message}")]
    Internal { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ValidationError> for ClientError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ClientError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

impl From<tokio::task::JoinError> for ClientError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Internal {
            message: format!("blocking task failed: {value}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

impl ClientError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            Self::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND",
                    message: self.to_string(),
                },
            ),
            Self::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "VALIDATION_FAILED",
                    message: err.to_string(),
                },
            ),
            Self::Store(_) | Self::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL",
                    message: "internal server error".to_string(),
                },
            ),
        }
    }
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_detail();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody { error })).into_response()
    }
}

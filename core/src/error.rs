//! Error types for `ClientApi` parse and build methods.
//!
//! 404 and 422 get dedicated variants carrying the server's message; any other
//! unexpected status lands in `HttpError` with the raw body.

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: no client with that id.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server returned 422: the payload broke a record invariant.
    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pulls `error.message` out of a server error body, falling back to the raw
/// body when it is not in the expected shape.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

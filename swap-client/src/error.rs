//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed or missing input, detected before dispatch
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller role or identity does not permit the operation
    #[error("Permission denied: {0}")]
    Authorization(String),

    /// Token missing, expired, or invalid; the session has been torn down
    #[error("Authentication required: {0}")]
    Authentication(String),

    /// Operation not valid for the entity's current lifecycle state
    #[error("Invalid state: {0}")]
    State(String),

    /// A concurrent mutation invalidated the operation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Application-level failure the client does not classify further
    #[error("API error {code}: {message}")]
    Api { code: i32, message: String },

    /// HTTP request failed (no response received, or timeout)
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session persistence failed
    #[error("Session storage error: {0}")]
    Storage(#[from] crate::session::SessionStoreError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Classify a failure envelope code.
    ///
    /// The backend collapses most rejections into code 500 plus a message;
    /// the conventional code family maps onto the typed taxonomy and
    /// everything else surfaces as [`ClientError::Api`].
    pub(crate) fn from_envelope(code: i32, message: String) -> Self {
        match code {
            400 => Self::Validation(message),
            401 => Self::Authentication(message),
            403 => Self::Authorization(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            422 => Self::State(message),
            _ => Self::Api { code, message },
        }
    }

    /// Map a non-envelope reply by its transport status.
    pub(crate) fn from_status(status: http::StatusCode, text: String) -> Self {
        match status {
            http::StatusCode::UNAUTHORIZED => Self::Authentication(text),
            http::StatusCode::FORBIDDEN => Self::Authorization(text),
            http::StatusCode::NOT_FOUND => Self::NotFound(text),
            http::StatusCode::BAD_REQUEST => Self::Validation(text),
            http::StatusCode::CONFLICT => Self::Conflict(text),
            http::StatusCode::UNPROCESSABLE_ENTITY => Self::State(text),
            _ => Self::Internal(text),
        }
    }
}

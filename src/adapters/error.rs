//! Error types for the backend and storage adapters

use thiserror::Error;

/// Errors from the document storage API
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage API answered with a non-success status
    #[error("storage request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// Transport-level failure
    #[error("storage request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A domain object failed validation before it was sent
    #[error(transparent)]
    Validation(#[from] crate::domain::ValidationError),
}

/// Errors from the agent invocation endpoint. Fatal for the current
/// turn; malformed stream lines are not errors and are discarded inside
/// the assembler instead.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The backend answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport-level failure (connect, send, or mid-stream)
    #[error("stream failed: {0}")]
    Network(#[from] reqwest::Error),
}

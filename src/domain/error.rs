//! Validation errors for domain types

use thiserror::Error;

/// Errors produced by the domain `validate` routines
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty after trimming
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A URL field did not parse
    #[error("URL is not valid: {0}")]
    InvalidUrl(String),

    /// An LLM-facing name contains characters outside the allowed set
    #[error("{field} is invalid: allowed characters are letters, digits, '_', '-' and '.'")]
    InvalidLlmName { field: &'static str },

    /// A tool args schema violated its structural constraints
    #[error("args_schema is invalid: {0}")]
    InvalidArgsSchema(String),

    /// An unsupported tool kind was supplied by a server
    #[error("unsupported tool type: {0}")]
    UnsupportedToolType(String),
}

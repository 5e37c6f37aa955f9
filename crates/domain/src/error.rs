//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating caller input.
///
/// Every variant is a validation failure: the message is meant to be shown
/// to the caller as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}. Supported methods: GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS")]
    UnsupportedMethod(String),

    /// A field expected to be a key-value object has another shape.
    #[error("{0} must be an object of key-value pairs")]
    NotAKeyValueMap(&'static str),

    /// The timeout is not a positive number.
    #[error("timeout must be a positive number")]
    InvalidTimeout,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

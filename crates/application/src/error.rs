//! Application error types

use serde_json::Value as JsonValue;
use thiserror::Error;
use courier_domain::DomainError;

use crate::ports::{HttpClientError, StoreError};

/// Application-level errors.
///
/// Every failure surfaced by a use case falls into one of these kinds, and
/// the HTTP layer maps each kind to a status code.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Caller input was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The addressed resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The target server answered with a non-success status, or the
    /// round-trip failed before any response arrived.
    #[error("{message}")]
    Upstream {
        /// Status returned by the target, if a response was received
        status: Option<u16>,
        /// Human-readable description
        message: String,
        /// Decoded response body, if a response was received
        data: Option<JsonValue>,
    },

    /// An import document matched no known format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Reading or writing persisted state failed.
    #[error("storage error: {0}")]
    Persistence(String),

    /// An unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Shorthand for a not-found error on a named resource.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<StoreError> for ApplicationError {
    fn from(error: StoreError) -> Self {
        Self::Persistence(error.to_string())
    }
}

impl From<HttpClientError> for ApplicationError {
    fn from(error: HttpClientError) -> Self {
        match error {
            HttpClientError::InvalidUrl(message) => Self::Validation(message),
            HttpClientError::InvalidBody(message) => Self::Internal(message),
            other => Self::Upstream {
                status: None,
                message: other.to_string(),
                data: None,
            },
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_is_upstream_without_status() {
        let error = ApplicationError::from(HttpClientError::Timeout { timeout_ms: 250 });
        assert!(matches!(
            error,
            ApplicationError::Upstream { status: None, data: None, .. }
        ));
        assert_eq!(error.to_string(), "request timed out after 250ms");
    }

    #[test]
    fn test_domain_error_is_validation() {
        let error = ApplicationError::from(DomainError::MissingField("url"));
        assert!(matches!(error, ApplicationError::Validation(_)));
        assert_eq!(error.to_string(), "url is required");
    }
}

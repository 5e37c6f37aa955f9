//! HTTP client port

use std::future::Future;
use std::pin::Pin;

use courier_domain::{RequestSpec, ResponseSpec};

/// Errors from the transport, before any HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpClientError {
    /// The request did not complete within its timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve
        host: String,
        /// Underlying error
        message: String,
    },

    /// The target refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect chain was too long.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit
        max: usize,
    },

    /// The URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpClientFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for performing one HTTP round-trip.
///
/// Implementations send exactly what they are given: the caller has
/// already dropped bodies the method does not carry. Timing is measured by
/// the caller.
pub trait HttpClient: Send + Sync {
    /// Sends the request and decodes the response, whatever its status.
    fn execute(&self, request: &RequestSpec) -> HttpClientFuture<'_>;
}

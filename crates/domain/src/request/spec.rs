//! Validated outbound request.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{HttpMethod, OrderedMap, RequestBody};

/// Default timeout for outbound requests, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Everything needed to send one outbound HTTP call.
///
/// Instances are produced by the executor's validation step, so the URL is
/// known to parse and the method is one of the supported verbs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL (variables already resolved)
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: OrderedMap,
    /// Query parameters appended to the URL
    #[serde(default)]
    pub params: OrderedMap,
    /// Request body as supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Timeout in milliseconds
    pub timeout_ms: u64,
}

impl RequestSpec {
    /// Creates a request with no headers, params or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: OrderedMap::new(),
            params: OrderedMap::new(),
            body: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Returns the body that goes on the wire.
    ///
    /// Bodies are only sent for methods that carry one; empty bodies are
    /// never sent.
    #[must_use]
    pub fn outbound_body(&self) -> Option<&RequestBody> {
        if !self.method.has_body() {
            return None;
        }
        self.body.as_ref().filter(|body| !body.is_empty())
    }

    /// Returns the URL with `params` appended to its query string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.url)?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        Ok(url)
    }
}

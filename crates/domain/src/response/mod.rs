//! HTTP response domain types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::request::OrderedMap;

/// A response as received from the upstream server, before timing is
/// attached by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status (may be empty)
    pub status_text: String,
    /// Response headers
    pub headers: OrderedMap,
    /// Response body: parsed JSON when the payload is JSON, otherwise the
    /// body text as a JSON string.
    pub data: JsonValue,
}

impl ResponseSpec {
    /// Creates a response spec.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: OrderedMap,
        data: JsonValue,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            data,
        }
    }

    /// Decodes a response body: JSON when it parses, text otherwise.
    #[must_use]
    pub fn decode_body(bytes: &[u8]) -> JsonValue {
        if bytes.is_empty() {
            return JsonValue::String(String::new());
        }
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(bytes).into_owned()))
    }

    /// Returns true for a completed round-trip (2xx or 3xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 400
    }
}

/// Outcome of a successful execution, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Response body
    pub data: JsonValue,
    /// HTTP status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Response headers
    pub headers: OrderedMap,
    /// Wall-clock time around the call, in milliseconds
    pub response_time: u64,
}

impl ExecutionResult {
    /// Attaches the measured response time to an upstream response.
    #[must_use]
    pub fn from_response(response: ResponseSpec, response_time: u64) -> Self {
        Self {
            data: response.data,
            status: response.status,
            status_text: response.status_text,
            headers: response.headers,
            response_time,
        }
    }
}

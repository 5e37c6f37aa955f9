//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

use courier_application::ports::{HttpClient, HttpClientError, HttpClientFuture};
use courier_domain::{HttpMethod, OrderedMap, RequestBody, RequestSpec, ResponseSpec};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("Courier/", env!("CARGO_PKG_VERSION"));

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Redirects are followed (up to 10) and TLS certificates are verified.
/// The per-request timeout comes from the request itself.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client sending the default user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Creates a client sending `user_agent` unless a request sets its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Attaches the body, adding a content type unless the caller set one.
    fn build_body(
        builder: RequestBuilder,
        body: &RequestBody,
        has_content_type: bool,
    ) -> Result<RequestBuilder, HttpClientError> {
        match body {
            RequestBody::Text(text) => Ok(builder.body(text.clone())),
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(value)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
                let builder = if has_content_type {
                    builder
                } else {
                    builder.header(CONTENT_TYPE, "application/json")
                };
                Ok(builder.body(bytes))
            }
            RequestBody::Form(fields) => {
                let encoded = serde_urlencoded::to_string(fields)
                    .map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;
                let builder = if has_content_type {
                    builder
                } else {
                    builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                };
                Ok(builder.body(encoded))
            }
        }
    }

    /// Flattens response headers; repeated names are joined with `", "`.
    fn collect_headers(headers: &HeaderMap) -> OrderedMap {
        let mut collected = OrderedMap::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            collected
                .entry(name.as_str().to_string())
                .and_modify(|existing: &mut String| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        collected
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = format!("{error:?}");
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message: error.to_string(),
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpClientFuture<'_> {
        let method = request.method;
        let url = request.full_url();
        let headers = request.headers.clone();
        let body = request.body.clone();
        let timeout_ms = request.timeout_ms;

        Box::pin(async move {
            let url = url.map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), url.clone())
                .timeout(Duration::from_millis(timeout_ms));

            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            if let Some(body) = &body {
                let has_content_type = headers.keys().any(|k| k.eq_ignore_ascii_case("content-type"));
                builder = Self::build_body(builder, body, has_content_type)?;
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status();
            let response_headers = Self::collect_headers(response.headers());
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            debug!(%method, %url, status = status.as_u16(), bytes = bytes.len(), "response received");

            Ok(ResponseSpec::new(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                response_headers,
                ResponseSpec::decode_body(&bytes),
            ))
        })
    }
}

//! Execute Request Use Case
//!
//! Validates a raw request, performs the round-trip, measures it and
//! records successful executions in the history log.

use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use url::Url;

use courier_domain::{
    DomainError, ExecutionResult, HttpMethod, OrderedMap, RequestBody, RequestSpec,
};

use crate::ports::{EnvironmentRepository, HistoryStore, HttpClient};
use crate::use_cases::{EnvironmentService, HistoryService};
use crate::variable_resolver::VariableResolver;
use crate::{ApplicationError, ApplicationResult};

/// A request as submitted by a caller, before validation.
///
/// Shapes are kept loose so that validation can report what is wrong with
/// each field instead of failing at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequestInput {
    /// Target URL
    #[serde(default)]
    pub url: Option<String>,
    /// HTTP method, case-insensitive
    #[serde(default)]
    pub method: Option<String>,
    /// Header map
    #[serde(default)]
    pub headers: Option<JsonValue>,
    /// Query parameter map
    #[serde(default)]
    pub params: Option<JsonValue>,
    /// Body; `{"$form": {..}}` is a form body
    #[serde(default)]
    pub body: Option<RequestBody>,
    /// Timeout in milliseconds
    #[serde(default)]
    pub timeout: Option<JsonValue>,
    /// Substitute `{{variables}}` from the active environment first
    #[serde(default)]
    pub resolve_variables: bool,
}

impl ExecuteRequestInput {
    /// Creates an input for `method` and `url` with nothing else set.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            method: Some(method.into()),
            ..Self::default()
        }
    }

    /// Substitutes variables in the URL, header and param values, and body.
    #[must_use]
    pub fn resolved(self, resolver: &VariableResolver<'_>) -> Self {
        Self {
            url: self.url.as_deref().map(|u| resolver.resolve_str(u)),
            headers: self.headers.as_ref().map(|h| resolver.resolve_json(h)),
            params: self.params.as_ref().map(|p| resolver.resolve_json(p)),
            body: self.body.as_ref().map(|b| resolver.resolve_body(b)),
            ..self
        }
    }

    /// Checks every field and builds the request to send.
    ///
    /// # Errors
    /// Returns the first field that is missing or malformed.
    pub fn validate(self, default_timeout_ms: u64) -> Result<RequestSpec, DomainError> {
        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(DomainError::MissingField("url"))?;
        let parsed = Url::parse(url).map_err(|e| DomainError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let method: HttpMethod = self
            .method
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or(DomainError::MissingField("method"))?
            .parse()?;

        Ok(RequestSpec {
            method,
            url: url.to_string(),
            headers: key_value_map(self.headers, "headers")?,
            params: key_value_map(self.params, "params")?,
            body: self.body,
            timeout_ms: timeout_ms(self.timeout, default_timeout_ms)?,
        })
    }
}

/// Converts a loose JSON object into a string map.
///
/// Scalar values are stringified; `null` entries are dropped.
fn key_value_map(value: Option<JsonValue>, field: &'static str) -> Result<OrderedMap, DomainError> {
    match value {
        None | Some(JsonValue::Null) => Ok(OrderedMap::new()),
        Some(JsonValue::Object(map)) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| match value {
                JsonValue::Null => None,
                JsonValue::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect()),
        Some(_) => Err(DomainError::NotAKeyValueMap(field)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn timeout_ms(value: Option<JsonValue>, default_ms: u64) -> Result<u64, DomainError> {
    let number = match value {
        None | Some(JsonValue::Null) => return Ok(default_ms),
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match number {
        Some(ms) if ms.is_finite() && ms > 0.0 => Ok(ms.ceil() as u64),
        _ => Err(DomainError::InvalidTimeout),
    }
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let use_case = ExecuteRequest::new(client, history, environments, 30_000);
/// let result = use_case.execute(ExecuteRequestInput::new("GET", "https://api.example.com")).await?;
/// ```
pub struct ExecuteRequest<C, H, E> {
    client: Arc<C>,
    history: Arc<HistoryService<H>>,
    environments: Arc<EnvironmentService<E>>,
    default_timeout_ms: u64,
}

impl<C, H, E> ExecuteRequest<C, H, E>
where
    C: HttpClient,
    H: HistoryStore,
    E: EnvironmentRepository,
{
    /// Creates the use case.
    pub const fn new(
        client: Arc<C>,
        history: Arc<HistoryService<H>>,
        environments: Arc<EnvironmentService<E>>,
        default_timeout_ms: u64,
    ) -> Self {
        Self {
            client,
            history,
            environments,
            default_timeout_ms,
        }
    }

    /// Validates and executes the request.
    ///
    /// A 2xx or 3xx response is appended to the history and then returned.
    /// Any other status, and any transport failure, is an error and is not
    /// recorded.
    ///
    /// # Errors
    /// - `Validation` if the input is malformed; nothing is sent.
    /// - `Persistence` if the round-trip succeeded but the history could
    ///   not be written.
    /// - `Upstream` with the status and body of a non-success response.
    /// - `Upstream` without a status if the round-trip failed.
    pub async fn execute(&self, input: ExecuteRequestInput) -> ApplicationResult<ExecutionResult> {
        let input = if input.resolve_variables {
            let variables = self.environments.active_variables().await?;
            let resolver = VariableResolver::new(&variables);
            if let Some(url) = &input.url {
                let unresolved = resolver.find_unresolved(url);
                if !unresolved.is_empty() {
                    debug!(?unresolved, "unresolved variables in URL");
                }
            }
            input.resolved(&resolver)
        } else {
            input
        };

        let request = input.validate(self.default_timeout_ms)?;

        let mut outbound = request.clone();
        outbound.body = request.outbound_body().cloned();

        let started = Instant::now();
        let response = self.client.execute(&outbound).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = response.map_err(|error| {
            warn!(method = %request.method, url = %request.url, %error, "request failed");
            ApplicationError::from(error)
        })?;

        if !response.is_success() {
            info!(
                method = %request.method,
                url = %request.url,
                status = response.status,
                elapsed_ms,
                "upstream returned an error status"
            );
            return Err(ApplicationError::Upstream {
                status: Some(response.status),
                message: format!("Request failed with status code {}", response.status),
                data: Some(response.data),
            });
        }

        let result = ExecutionResult::from_response(response, elapsed_ms);
        info!(
            method = %request.method,
            url = %request.url,
            status = result.status,
            elapsed_ms,
            "request executed"
        );

        self.history.append(&request, &result).await?;

        Ok(result)
    }
}

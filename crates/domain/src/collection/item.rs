//! Saved request types

use serde::{Deserialize, Serialize};

use crate::id::Id;
use crate::request::{HttpMethod, OrderedMap, RequestBody};

/// One saved HTTP request definition, owned by a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    /// Unique identifier
    pub id: Id,
    /// Human-readable name
    pub name: String,
    /// Target URL (may contain variable placeholders)
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// HTTP headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<OrderedMap>,
    /// Request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Query parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<OrderedMap>,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RequestItem {
    /// Merges the fields present in `patch` onto this request.
    pub fn apply(&mut self, patch: RequestItemPatch) {
        let RequestItemPatch {
            name,
            url,
            method,
            headers,
            body,
            params,
            description,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(method) = method {
            self.method = method;
        }
        if headers.is_some() {
            self.headers = headers;
        }
        if body.is_some() {
            self.body = body;
        }
        if params.is_some() {
            self.params = params;
        }
        if description.is_some() {
            self.description = description;
        }
    }
}

/// A request to be added to a collection.
///
/// It carries no id: the store assigns a fresh one on insertion, and any
/// `id` in the caller's payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequestItem {
    /// Human-readable name
    pub name: String,
    /// Target URL
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// HTTP headers
    #[serde(default)]
    pub headers: Option<OrderedMap>,
    /// Request body; `{"$form": {..}}` is a form body
    #[serde(default)]
    pub body: Option<RequestBody>,
    /// Query parameters
    #[serde(default)]
    pub params: Option<OrderedMap>,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewRequestItem {
    /// Creates a request with only the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method,
            headers: None,
            body: None,
            params: None,
            description: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(OrderedMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Turns this into a stored request with the given id.
    #[must_use]
    pub fn into_item(self, id: Id) -> RequestItem {
        RequestItem {
            id,
            name: self.name,
            url: self.url,
            method: self.method,
            headers: self.headers,
            body: self.body,
            params: self.params,
            description: self.description,
        }
    }
}

/// Partial update of a saved request. Absent fields are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItemPatch {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New URL
    #[serde(default)]
    pub url: Option<String>,
    /// New method
    #[serde(default)]
    pub method: Option<HttpMethod>,
    /// Replacement headers
    #[serde(default)]
    pub headers: Option<OrderedMap>,
    /// Replacement body
    #[serde(default)]
    pub body: Option<RequestBody>,
    /// Replacement query parameters
    #[serde(default)]
    pub params: Option<OrderedMap>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
}

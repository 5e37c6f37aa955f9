//! Request History Domain Model
//!
//! Defines the record of executed requests and the bounded log that keeps
//! the most recent ones.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::id::Id;
use crate::request::{HttpMethod, OrderedMap, RequestBody, RequestSpec};
use crate::response::ExecutionResult;

/// Number of entries the history keeps unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// The response half of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Response headers
    #[serde(default)]
    pub headers: OrderedMap,
    /// Response body
    #[serde(default)]
    pub body: JsonValue,
    /// Response time in milliseconds
    pub response_time: u64,
}

impl From<&ExecutionResult> for HistoryResponse {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            status: result.status,
            status_text: result.status_text.clone(),
            headers: result.headers.clone(),
            body: result.data.clone(),
            response_time: result.response_time,
        }
    }
}

/// A single entry in the request history. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique identifier for this entry.
    pub id: Id,
    /// The request URL.
    pub url: String,
    /// HTTP method used.
    pub method: HttpMethod,
    /// Request headers.
    #[serde(default)]
    pub headers: OrderedMap,
    /// Request body as supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Query parameters.
    #[serde(default)]
    pub params: OrderedMap,
    /// Outcome of the round-trip.
    pub response: HistoryResponse,
    /// When the request was executed.
    pub timestamp: DateTime<Utc>,
}

impl HistoryItem {
    /// Records a completed round-trip.
    #[must_use]
    pub fn new(id: Id, request: &RequestSpec, result: &ExecutionResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            url: request.url.clone(),
            method: request.method,
            headers: request.headers.clone(),
            body: request.body.clone(),
            params: request.params.clone(),
            response: HistoryResponse::from(result),
            timestamp,
        }
    }
}

/// One page of history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPage {
    /// Entries in the page, newest first.
    pub items: Vec<HistoryItem>,
    /// Total number of entries in the log.
    pub total: usize,
}

/// Request history with a maximum size limit (newest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHistory {
    entries: VecDeque<HistoryItem>,
    max_entries: usize,
}

impl Default for RequestHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl RequestHistory {
    /// Creates a new empty history.
    #[must_use]
    pub const fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Rebuilds a history from persisted entries (newest first), trimming
    /// anything beyond the limit.
    #[must_use]
    pub fn from_items(items: Vec<HistoryItem>, max_entries: usize) -> Self {
        let mut entries = VecDeque::from(items);
        entries.truncate(max_entries);
        Self {
            entries,
            max_entries,
        }
    }

    /// Adds an entry to the history (at the front), evicting the oldest
    /// entries beyond the limit.
    pub fn add(&mut self, entry: HistoryItem) {
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
    }

    /// Returns all entries (newest first).
    #[must_use]
    pub const fn entries(&self) -> &VecDeque<HistoryItem> {
        &self.entries
    }

    /// Returns a contiguous slice of `limit` entries starting at `offset`.
    #[must_use]
    pub fn page(&self, limit: usize, offset: usize) -> HistoryPage {
        HistoryPage {
            items: self.entries.iter().skip(offset).take(limit).cloned().collect(),
            total: self.entries.len(),
        }
    }

    /// Returns an entry by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Clears all history entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the history, returning entries newest first.
    #[must_use]
    pub fn into_items(self) -> Vec<HistoryItem> {
        self.entries.into()
    }
}

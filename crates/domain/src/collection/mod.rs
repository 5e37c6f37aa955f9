//! Collection domain types
//!
//! A collection is a named, ordered set of saved requests. The whole set of
//! collections persists as one [`CollectionsDocument`].

mod item;

pub use item::{NewRequestItem, RequestItem, RequestItemPatch};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::Id;

/// A named group of saved requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier
    pub id: Id,
    /// Collection name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Saved requests, in insertion order
    #[serde(default)]
    pub requests: Vec<RequestItem>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time of the collection or any of its requests
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(
        id: Id,
        name: impl Into<String>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            requests: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the fields present in `patch`.
    pub fn apply(&mut self, patch: CollectionPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        self.updated_at = now;
    }

    /// Appends a request and returns a reference to the stored copy.
    pub fn add_request(&mut self, request: RequestItem, now: DateTime<Utc>) -> &RequestItem {
        self.updated_at = now;
        self.requests.push(request);
        &self.requests[self.requests.len() - 1]
    }

    /// Returns the request with the given id.
    #[must_use]
    pub fn request(&self, request_id: &str) -> Option<&RequestItem> {
        self.requests.iter().find(|r| r.id == request_id)
    }

    /// Applies a partial update to a request. `None` if the request is unknown.
    pub fn update_request(
        &mut self,
        request_id: &str,
        patch: RequestItemPatch,
        now: DateTime<Utc>,
    ) -> Option<&RequestItem> {
        let request = self.requests.iter_mut().find(|r| r.id == request_id)?;
        request.apply(patch);
        self.updated_at = now;
        Some(request)
    }

    /// Removes a request. `None` if the request is unknown.
    pub fn remove_request(&mut self, request_id: &str, now: DateTime<Utc>) -> Option<RequestItem> {
        let index = self.requests.iter().position(|r| r.id == request_id)?;
        self.updated_at = now;
        Some(self.requests.remove(index))
    }
}

/// Partial update of a collection's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPatch {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
}

/// The persisted shape of the collection store: `{ "collections": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsDocument {
    /// All collections, in creation order.
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl CollectionsDocument {
    /// Returns the collection with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Returns a mutable reference to the collection with the given id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.id == id)
    }

    /// Removes a collection and all of its requests.
    pub fn remove(&mut self, id: &str) -> Option<Collection> {
        let index = self.collections.iter().position(|c| c.id == id)?;
        Some(self.collections.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use chrono::Duration;

    fn sample(now: DateTime<Utc>) -> Collection {
        let mut collection = Collection::new("c-1".into(), "Billing", None, now);
        collection.add_request(
            NewRequestItem::new("Invoices", HttpMethod::Get, "https://api.test/invoices")
                .into_item("r-1".into()),
            now,
        );
        collection
    }

    #[test]
    fn test_mutations_touch_updated_at() {
        let t0 = Utc::now();
        let mut collection = sample(t0);

        let t1 = t0 + Duration::seconds(5);
        let patch = RequestItemPatch {
            url: Some("https://api.test/v2/invoices".into()),
            ..RequestItemPatch::default()
        };
        assert!(collection.update_request("r-1", patch, t1).is_some());
        assert_eq!(collection.updated_at, t1);
        assert_eq!(collection.created_at, t0);

        let t2 = t1 + Duration::seconds(5);
        assert!(collection.remove_request("r-1", t2).is_some());
        assert_eq!(collection.updated_at, t2);
        assert!(collection.requests.is_empty());
    }

    #[test]
    fn test_unknown_request_is_none_and_untouched() {
        let t0 = Utc::now();
        let mut collection = sample(t0);
        let later = t0 + Duration::seconds(1);

        assert!(collection.update_request("missing", RequestItemPatch::default(), later).is_none());
        assert!(collection.remove_request("missing", later).is_none());
        assert_eq!(collection.updated_at, t0);
    }

    #[test]
    fn test_patch_keeps_description_when_absent() {
        let now = Utc::now();
        let mut collection = Collection::new("c".into(), "A", Some("desc".into()), now);
        collection.apply(
            CollectionPatch {
                name: Some("B".into()),
                description: None,
            },
            now,
        );
        assert_eq!(collection.name, "B");
        assert_eq!(collection.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_document_remove() {
        let now = Utc::now();
        let mut document = CollectionsDocument {
            collections: vec![sample(now)],
        };
        assert!(document.remove("c-1").is_some());
        assert!(document.get("c-1").is_none());
        assert!(document.remove("c-1").is_none());
    }
}

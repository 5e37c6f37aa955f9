//! Collection use cases
//!
//! CRUD over collections and the requests they own.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use courier_domain::{
    Collection, CollectionPatch, CollectionsDocument, DomainError, NewRequestItem, RequestItem,
    RequestItemPatch, generate_id,
};

use crate::ports::{Clock, CollectionStore};
use crate::{ApplicationError, ApplicationResult};

/// Input for creating a collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCollection {
    /// Collection name
    #[serde(default)]
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Manages the collections document.
///
/// Every mutation loads the whole document, applies the change and writes
/// it back while holding the service's write lock, so concurrent writers
/// never overwrite each other's changes.
pub struct CollectionService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl<S: CollectionStore> CollectionService<S> {
    /// Creates a new service over `store`.
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Lists all collections in creation order.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn list(&self) -> ApplicationResult<Vec<Collection>> {
        Ok(self.store.load().await?.collections)
    }

    /// Returns one collection.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn get_by_id(&self, id: &str) -> ApplicationResult<Option<Collection>> {
        Ok(self.store.load().await?.get(id).cloned())
    }

    /// Creates an empty collection.
    ///
    /// # Errors
    /// Returns a validation error if the name is blank, or a persistence
    /// error if the store cannot be written.
    pub async fn create(&self, input: NewCollection) -> ApplicationResult<Collection> {
        require_text(&input.name, "name")?;
        self.import(input, Vec::new()).await
    }

    /// Creates a collection holding `requests`, each with a fresh id, in a
    /// single write.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn import(
        &self,
        input: NewCollection,
        requests: Vec<NewRequestItem>,
    ) -> ApplicationResult<Collection> {
        let created = self
            .mutate(|document, now| {
                let mut collection = Collection::new(generate_id(), input.name, input.description, now);
                for request in requests {
                    collection.add_request(request.into_item(generate_id()), now);
                }
                document.collections.push(collection.clone());
                Some(collection)
            })
            .await?;
        created.ok_or_else(|| ApplicationError::Internal("collection was not created".into()))
    }

    /// Updates a collection's name and/or description.
    ///
    /// # Errors
    /// Returns a validation error if a supplied name is blank.
    pub async fn update(
        &self,
        id: &str,
        patch: CollectionPatch,
    ) -> ApplicationResult<Option<Collection>> {
        if let Some(name) = &patch.name {
            require_text(name, "name")?;
        }
        self.mutate(|document, now| {
            let collection = document.get_mut(id)?;
            collection.apply(patch, now);
            Some(collection.clone())
        })
        .await
    }

    /// Deletes a collection and all of its requests.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn delete(&self, id: &str) -> ApplicationResult<Option<Collection>> {
        self.mutate(|document, _| document.remove(id)).await
    }

    /// Appends a request to a collection under a fresh id.
    ///
    /// # Errors
    /// Returns a validation error if the name or URL is blank.
    pub async fn add_request(
        &self,
        collection_id: &str,
        request: NewRequestItem,
    ) -> ApplicationResult<Option<RequestItem>> {
        require_text(&request.name, "name")?;
        require_text(&request.url, "url")?;
        self.mutate(|document, now| {
            let collection = document.get_mut(collection_id)?;
            Some(collection.add_request(request.into_item(generate_id()), now).clone())
        })
        .await
    }

    /// Partially updates a request. `None` if either the collection or the
    /// request is unknown.
    ///
    /// # Errors
    /// Returns a validation error if a supplied name or URL is blank.
    pub async fn update_request(
        &self,
        collection_id: &str,
        request_id: &str,
        patch: RequestItemPatch,
    ) -> ApplicationResult<Option<RequestItem>> {
        if let Some(name) = &patch.name {
            require_text(name, "name")?;
        }
        if let Some(url) = &patch.url {
            require_text(url, "url")?;
        }
        self.mutate(|document, now| {
            document
                .get_mut(collection_id)?
                .update_request(request_id, patch, now)
                .cloned()
        })
        .await
    }

    /// Removes a request from a collection.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn delete_request(
        &self,
        collection_id: &str,
        request_id: &str,
    ) -> ApplicationResult<Option<RequestItem>> {
        self.mutate(|document, now| document.get_mut(collection_id)?.remove_request(request_id, now))
            .await
    }

    /// Runs one read-modify-write cycle. The document is written back only
    /// when `change` reports a result.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut CollectionsDocument, DateTime<Utc>) -> Option<T>,
    ) -> ApplicationResult<Option<T>> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;
        let outcome = change(&mut document, self.clock.now());
        if outcome.is_some() {
            self.store.save(&document).await?;
        }
        Ok(outcome)
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MemoryCollectionStore, StepClock};
    use courier_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering;

    fn service() -> CollectionService<MemoryCollectionStore> {
        CollectionService::new(MemoryCollectionStore::default(), Arc::new(StepClock::new()))
    }

    fn named(name: &str) -> NewCollection {
        NewCollection {
            name: name.into(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service.create(named("Billing")).await.expect("create");

        let fetched = service.get_by_id(&created.id).await.expect("get");
        assert_eq!(fetched, Some(created));
        assert_eq!(service.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let service = service();
        let result = service.create(named("   ")).await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
        assert!(service.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_add_request_assigns_id_and_touches_parent() {
        let service = service();
        let collection = service.create(named("Users")).await.expect("create");

        let request = NewRequestItem::new("List", HttpMethod::Get, "https://api.test/users");
        let added = service
            .add_request(&collection.id, request)
            .await
            .expect("add")
            .expect("collection exists");
        assert!(!added.id.is_empty());

        let stored = service
            .get_by_id(&collection.id)
            .await
            .expect("get")
            .expect("collection exists");
        assert_eq!(stored.requests, vec![added]);
        assert!(stored.updated_at > collection.updated_at);
    }

    #[tokio::test]
    async fn test_update_request_in_unknown_collection_is_none() {
        let service = service();
        let patch = RequestItemPatch {
            name: Some("renamed".into()),
            ..RequestItemPatch::default()
        };
        let result = service
            .update_request("no-such-collection", "r-1", patch)
            .await
            .expect("no storage failure");
        assert_eq!(result, None);
        assert_eq!(service.store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_request() {
        let service = service();
        let collection = service.create(named("Users")).await.expect("create");
        let added = service
            .add_request(
                &collection.id,
                NewRequestItem::new("Get", HttpMethod::Get, "https://api.test/u/1"),
            )
            .await
            .expect("add")
            .expect("collection exists");

        let patch = RequestItemPatch {
            method: Some(HttpMethod::Delete),
            ..RequestItemPatch::default()
        };
        let updated = service
            .update_request(&collection.id, &added.id, patch)
            .await
            .expect("update")
            .expect("request exists");
        assert_eq!(updated.method, HttpMethod::Delete);
        assert_eq!(updated.name, "Get");

        let removed = service
            .delete_request(&collection.id, &added.id)
            .await
            .expect("delete");
        assert_eq!(removed.map(|r| r.id), Some(added.id.clone()));
        assert_eq!(
            service.delete_request(&collection.id, &added.id).await.expect("delete"),
            None
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_collection() {
        let service = service();
        let collection = service.create(named("Old")).await.expect("create");

        let patch = CollectionPatch {
            name: Some("New".into()),
            description: Some("desc".into()),
        };
        let updated = service
            .update(&collection.id, patch)
            .await
            .expect("update")
            .expect("exists");
        assert_eq!(updated.name, "New");
        assert_eq!(updated.description.as_deref(), Some("desc"));

        assert!(service.delete(&collection.id).await.expect("delete").is_some());
        assert!(service.delete(&collection.id).await.expect("delete").is_none());
        assert!(service.update("gone", CollectionPatch::default()).await.expect("update").is_none());
    }

    #[tokio::test]
    async fn test_import_writes_once() {
        let service = service();
        let requests = vec![
            NewRequestItem::new("A", HttpMethod::Get, "https://a.test"),
            NewRequestItem::new("B", HttpMethod::Post, "https://b.test"),
        ];
        let collection = service.import(named("Imported"), requests).await.expect("import");

        assert_eq!(collection.requests.len(), 2);
        assert_ne!(collection.requests[0].id, collection.requests[1].id);
        assert_eq!(service.store.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let service = Arc::new(service());
        let collection = service.create(named("Race")).await.expect("create");

        let mut handles = Vec::new();
        for i in 0..20 {
            let service = Arc::clone(&service);
            let id = collection.id.clone();
            handles.push(tokio::spawn(async move {
                service
                    .add_request(
                        &id,
                        NewRequestItem::new(format!("r{i}"), HttpMethod::Get, "https://x.test"),
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.expect("join").expect("add");
        }

        let stored = service
            .get_by_id(&collection.id)
            .await
            .expect("get")
            .expect("exists");
        assert_eq!(stored.requests.len(), 20);
    }
}

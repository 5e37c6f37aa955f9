//! Import and export of collections in foreign formats

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::info;

use courier_domain::Collection;

use crate::ApplicationResult;
use crate::ports::{CollectionFormat, CollectionStore, CollectionTranslator, ImportWarning};
use crate::use_cases::CollectionService;
use crate::use_cases::collections::NewCollection;

/// Outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// The stored collection
    pub collection: Collection,
    /// Detected source format
    pub format: CollectionFormat,
    /// Items that were skipped
    pub warnings: Vec<ImportWarning>,
}

/// Imports a foreign collection document as a new collection.
pub struct ImportCollection<S, T> {
    collections: Arc<CollectionService<S>>,
    translator: Arc<T>,
}

impl<S: CollectionStore, T: CollectionTranslator> ImportCollection<S, T> {
    /// Creates the use case.
    pub const fn new(collections: Arc<CollectionService<S>>, translator: Arc<T>) -> Self {
        Self {
            collections,
            translator,
        }
    }

    /// Maps `document` and stores the result. Nothing is stored when the
    /// format is not recognized.
    ///
    /// # Errors
    /// Returns `UnsupportedFormat` for unknown documents, or a persistence
    /// error if the collection cannot be stored.
    pub async fn execute(&self, document: &JsonValue) -> ApplicationResult<ImportReport> {
        let imported = self.translator.import(document)?;
        let skipped = imported.warnings.len();

        let collection = self
            .collections
            .import(
                NewCollection {
                    name: imported.name,
                    description: imported.description,
                },
                imported.requests,
            )
            .await?;

        info!(
            format = %imported.format,
            collection = %collection.id,
            requests = collection.requests.len(),
            skipped,
            "collection imported"
        );

        Ok(ImportReport {
            collection,
            format: imported.format,
            warnings: imported.warnings,
        })
    }
}

/// Renders a stored collection as a Postman document.
pub struct ExportCollection<S, T> {
    collections: Arc<CollectionService<S>>,
    translator: Arc<T>,
}

impl<S: CollectionStore, T: CollectionTranslator> ExportCollection<S, T> {
    /// Creates the use case.
    pub const fn new(collections: Arc<CollectionService<S>>, translator: Arc<T>) -> Self {
        Self {
            collections,
            translator,
        }
    }

    /// Returns the exported document, or `None` if the collection is unknown.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn execute(&self, collection_id: &str) -> ApplicationResult<Option<JsonValue>> {
        let collection = self.collections.get_by_id(collection_id).await?;
        Ok(collection.map(|c| self.translator.export(&c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::ports::ImportedCollection;
    use crate::use_cases::test_support::{MemoryCollectionStore, StepClock};
    use courier_domain::{HttpMethod, NewRequestItem};
    use serde_json::json;

    /// Accepts documents carrying a `"requests"` array of URLs.
    struct UrlListTranslator;

    impl CollectionTranslator for UrlListTranslator {
        fn import(&self, document: &JsonValue) -> ApplicationResult<ImportedCollection> {
            let urls = document["requests"]
                .as_array()
                .ok_or_else(|| ApplicationError::UnsupportedFormat("no requests".into()))?;
            Ok(ImportedCollection {
                format: CollectionFormat::Postman,
                name: "Imported".into(),
                description: None,
                requests: urls
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(|u| NewRequestItem::new(u, HttpMethod::Get, u))
                    .collect(),
                warnings: vec![ImportWarning::info("folder", "Folders are not supported")],
            })
        }

        fn export(&self, collection: &Collection) -> JsonValue {
            json!({"name": collection.name, "count": collection.requests.len()})
        }
    }

    fn service() -> Arc<CollectionService<MemoryCollectionStore>> {
        Arc::new(CollectionService::new(
            MemoryCollectionStore::default(),
            Arc::new(StepClock::new()),
        ))
    }

    #[tokio::test]
    async fn test_import_stores_collection_with_warnings() {
        let collections = service();
        let import = ImportCollection::new(Arc::clone(&collections), Arc::new(UrlListTranslator));

        let report = import
            .execute(&json!({"requests": ["https://a.test", "https://b.test"]}))
            .await
            .expect("import");

        assert_eq!(report.collection.requests.len(), 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(collections.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_import_creates_nothing() {
        let collections = service();
        let import = ImportCollection::new(Arc::clone(&collections), Arc::new(UrlListTranslator));

        let result = import.execute(&json!({})).await;
        assert!(matches!(result, Err(ApplicationError::UnsupportedFormat(_))));
        assert!(collections.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_export_unknown_is_none() {
        let collections = service();
        let export = ExportCollection::new(Arc::clone(&collections), Arc::new(UrlListTranslator));
        assert_eq!(export.execute("missing").await.expect("export"), None);

        let created = collections
            .create(NewCollection {
                name: "Mine".into(),
                description: None,
            })
            .await
            .expect("create");
        assert_eq!(
            export.execute(&created.id).await.expect("export"),
            Some(json!({"name": "Mine", "count": 0}))
        );
    }
}

//! File-backed collection store.

use std::path::Path;

use async_trait::async_trait;

use courier_application::ports::{CollectionStore, StoreError};
use courier_domain::CollectionsDocument;

use super::JsonDocument;

/// Stores every collection in one `collections.json` document.
#[derive(Debug, Clone)]
pub struct FileCollectionStore {
    document: JsonDocument,
}

impl FileCollectionStore {
    /// File name inside the data directory.
    pub const FILE_NAME: &'static str = "collections.json";

    /// Creates a store rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            document: JsonDocument::new(data_dir.join(Self::FILE_NAME)),
        }
    }
}

#[async_trait]
impl CollectionStore for FileCollectionStore {
    async fn load(&self) -> Result<CollectionsDocument, StoreError> {
        self.document.read_or_init().await
    }

    async fn save(&self, document: &CollectionsDocument) -> Result<(), StoreError> {
        self.document.write(document).await
    }
}

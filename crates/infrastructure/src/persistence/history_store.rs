//! Request history persistence.
//!
//! The log is one `history.json` array, newest entry first.

use std::path::Path;

use async_trait::async_trait;

use courier_application::ports::{HistoryStore, StoreError};
use courier_domain::HistoryItem;

use super::JsonDocument;

/// File-backed history log.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    document: JsonDocument,
}

impl FileHistoryStore {
    /// File name inside the data directory.
    pub const FILE_NAME: &'static str = "history.json";

    /// Creates a store rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            document: JsonDocument::new(data_dir.join(Self::FILE_NAME)),
        }
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryItem>, StoreError> {
        self.document.read_or_init().await
    }

    async fn save(&self, items: &[HistoryItem]) -> Result<(), StoreError> {
        self.document.write(items).await
    }
}

//! Storage ports
//!
//! Each store reads and writes a whole document. Callers serialize their
//! read-modify-write cycles, so adapters only need atomic writes.

use async_trait::async_trait;

use courier_domain::{CollectionsDocument, HistoryItem};

/// Errors raised by persistence adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for the collections document.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Loads the document. A missing document reads as empty.
    ///
    /// # Errors
    /// Returns an error if the document exists but cannot be read or parsed.
    async fn load(&self) -> Result<CollectionsDocument, StoreError>;

    /// Replaces the persisted document.
    ///
    /// # Errors
    /// Returns an error if the document cannot be written.
    async fn save(&self, document: &CollectionsDocument) -> Result<(), StoreError>;
}

/// Port for the request history log.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Loads all entries, newest first. A missing log reads as empty.
    ///
    /// # Errors
    /// Returns an error if the log exists but cannot be read or parsed.
    async fn load(&self) -> Result<Vec<HistoryItem>, StoreError>;

    /// Replaces the persisted log.
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    async fn save(&self, items: &[HistoryItem]) -> Result<(), StoreError>;
}

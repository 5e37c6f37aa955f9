//! History use cases

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;

use courier_domain::{
    ExecutionResult, HistoryItem, HistoryPage, RequestHistory, RequestSpec, generate_id,
};

use crate::ApplicationResult;
use crate::ports::{Clock, HistoryStore};

/// Page size used when the caller gives none.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Pagination of a history listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of entries to return
    #[serde(default)]
    pub limit: Option<usize>,
    /// Number of newest entries to skip
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Manages the bounded request history log.
pub struct HistoryService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    max_entries: usize,
    write_lock: Mutex<()>,
}

impl<S: HistoryStore> HistoryService<S> {
    /// Creates a new service keeping at most `max_entries` entries.
    pub fn new(store: S, clock: Arc<dyn Clock>, max_entries: usize) -> Self {
        Self {
            store,
            clock,
            max_entries,
            write_lock: Mutex::new(()),
        }
    }

    /// Records a completed round-trip at the head of the log, evicting the
    /// oldest entries beyond the cap.
    ///
    /// # Errors
    /// Returns an error if the log cannot be read or written.
    pub async fn append(
        &self,
        request: &RequestSpec,
        result: &ExecutionResult,
    ) -> ApplicationResult<HistoryItem> {
        let _guard = self.write_lock.lock().await;
        let mut history = RequestHistory::from_items(self.store.load().await?, self.max_entries);
        let item = HistoryItem::new(generate_id(), request, result, self.clock.now());
        history.add(item.clone());
        self.store.save(&history.into_items()).await?;
        Ok(item)
    }

    /// Returns a page of entries, newest first.
    ///
    /// # Errors
    /// Returns an error if the log cannot be read.
    pub async fn list(&self, query: HistoryQuery) -> ApplicationResult<HistoryPage> {
        let history = RequestHistory::from_items(self.store.load().await?, self.max_entries);
        Ok(history.page(
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            query.offset.unwrap_or(0),
        ))
    }

    /// Removes every entry.
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    pub async fn clear(&self) -> ApplicationResult<()> {
        let _guard = self.write_lock.lock().await;
        self.store.save(&[]).await?;
        Ok(())
    }
}

//! In-memory ports shared by the use case tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use courier_domain::{CollectionsDocument, Environment, HistoryItem, Id};

use crate::ports::{Clock, CollectionStore, EnvironmentRepository, HistoryStore, StoreError};

/// Clock that advances one second on every reading.
pub struct StepClock {
    ticks: AtomicUsize,
}

impl StepClock {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicUsize::new(0),
        }
    }

    pub fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Self::epoch() + Duration::seconds(i64::try_from(tick).unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MemoryCollectionStore {
    pub document: Mutex<CollectionsDocument>,
    pub saves: AtomicUsize,
}

#[async_trait]
impl CollectionStore for MemoryCollectionStore {
    async fn load(&self) -> Result<CollectionsDocument, StoreError> {
        Ok(self.document.lock().expect("Lock poisoned").clone())
    }

    async fn save(&self, document: &CollectionsDocument) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.document.lock().expect("Lock poisoned") = document.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryHistoryStore {
    pub items: Mutex<Vec<HistoryItem>>,
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryItem>, StoreError> {
        Ok(self.items.lock().expect("Lock poisoned").clone())
    }

    async fn save(&self, items: &[HistoryItem]) -> Result<(), StoreError> {
        *self.items.lock().expect("Lock poisoned") = items.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryEnvironmentRepository {
    pub environments: Mutex<BTreeMap<Id, Environment>>,
    pub active_id: Mutex<Option<Id>>,
    pub pointer_writes: AtomicUsize,
}

#[async_trait]
impl EnvironmentRepository for MemoryEnvironmentRepository {
    async fn list(&self) -> Result<Vec<Environment>, StoreError> {
        Ok(self
            .environments
            .lock()
            .expect("Lock poisoned")
            .values()
            .cloned()
            .collect())
    }

    async fn save(&self, environment: &Environment) -> Result<(), StoreError> {
        self.environments
            .lock()
            .expect("Lock poisoned")
            .insert(environment.id.clone(), environment.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.environments.lock().expect("Lock poisoned").remove(id);
        Ok(())
    }

    async fn load_active_id(&self) -> Result<Option<Id>, StoreError> {
        Ok(self.active_id.lock().expect("Lock poisoned").clone())
    }

    async fn save_active_id(&self, id: Option<&str>) -> Result<(), StoreError> {
        self.pointer_writes.fetch_add(1, Ordering::SeqCst);
        *self.active_id.lock().expect("Lock poisoned") = id.map(str::to_string);
        Ok(())
    }
}

/// Store whose every operation fails.
pub struct BrokenStore;

#[async_trait]
impl HistoryStore for BrokenStore {
    async fn load(&self) -> Result<Vec<HistoryItem>, StoreError> {
        Err(StoreError::Serialization("corrupt history".into()))
    }

    async fn save(&self, _items: &[HistoryItem]) -> Result<(), StoreError> {
        Err(StoreError::Serialization("read-only".into()))
    }
}

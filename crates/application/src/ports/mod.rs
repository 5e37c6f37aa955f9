//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod collection_format;
mod environment_repository;
mod http_client;
mod storage;

pub use clock::Clock;
pub use collection_format::{
    CollectionFormat, CollectionTranslator, ImportWarning, ImportedCollection, WarningSeverity,
};
pub use environment_repository::EnvironmentRepository;
pub use http_client::{HttpClient, HttpClientError, HttpClientFuture};
pub use storage::{CollectionStore, HistoryStore, StoreError};

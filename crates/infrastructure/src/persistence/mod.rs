//! File system persistence
//!
//! JSON-document stores implementing the application's storage ports.

mod collection_store;
mod data_dir;
mod environment_repository;
mod history_store;
mod json_document;

pub use collection_store::FileCollectionStore;
pub use data_dir::default_data_dir;
pub use environment_repository::FileEnvironmentRepository;
pub use history_store::FileHistoryStore;
pub use json_document::JsonDocument;

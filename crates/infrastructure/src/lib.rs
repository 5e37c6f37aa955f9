//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: JSON-file stores, the reqwest
//! HTTP client, the system clock and the collection translators.

pub mod adapters;
pub mod export;
pub mod import;
pub mod persistence;
pub mod serialization;

pub use adapters::{JsonCollectionTranslator, ReqwestHttpClient, SystemClock};
pub use export::{POSTMAN_SCHEMA, PostmanExporter};
pub use import::{ImportError, detect_format, import_collection};
pub use persistence::{
    FileCollectionStore, FileEnvironmentRepository, FileHistoryStore, JsonDocument,
    default_data_dir,
};
pub use serialization::{SerializationError, from_json_bytes, to_json_pretty, to_json_stable_bytes};

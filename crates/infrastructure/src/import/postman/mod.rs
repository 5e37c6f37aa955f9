//! Postman collection import
//!
//! Maps Postman Collection v2.0/v2.1 documents onto the native model.

pub mod importer;
pub mod types;

pub use importer::{import_postman, is_postman_collection};
pub use types::PostmanCollection;

//! Insomnia export import

pub mod importer;
pub mod types;

pub use importer::{import_insomnia, is_insomnia_export};

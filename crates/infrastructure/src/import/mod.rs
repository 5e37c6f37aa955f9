//! Import infrastructure.
//!
//! Detects the family of a foreign collection document and maps it onto
//! the native model. Detection is structural:
//! - Postman: an `info` object and an `item` array,
//! - Insomnia: `_type == "export"` and a `resources` array.

pub mod insomnia;
pub mod postman;

use serde_json::Value as JsonValue;
use thiserror::Error;

use courier_application::ApplicationError;
use courier_application::ports::{CollectionFormat, ImportedCollection};
use courier_domain::OrderedMap;

/// Import error type.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document matched no known format.
    #[error("Unsupported import format")]
    UnsupportedFormat,

    /// The document looked like a known format but could not be read.
    #[error("Invalid {format} document: {message}")]
    Invalid {
        /// The detected format
        format: CollectionFormat,
        /// Parser message
        message: String,
    },
}

impl From<ImportError> for ApplicationError {
    fn from(error: ImportError) -> Self {
        match error {
            ImportError::UnsupportedFormat => Self::UnsupportedFormat(
                "expected a Postman collection or an Insomnia export".to_string(),
            ),
            ImportError::Invalid { .. } => Self::Validation(error.to_string()),
        }
    }
}

/// Returns the format `document` is shaped like, if any.
#[must_use]
pub fn detect_format(document: &JsonValue) -> Option<CollectionFormat> {
    if postman::is_postman_collection(document) {
        Some(CollectionFormat::Postman)
    } else if insomnia::is_insomnia_export(document) {
        Some(CollectionFormat::Insomnia)
    } else {
        None
    }
}

/// Detects the format of `document` and maps it.
///
/// # Errors
/// Returns [`ImportError::UnsupportedFormat`] when no format matches.
pub fn import_collection(document: &JsonValue) -> Result<ImportedCollection, ImportError> {
    match detect_format(document) {
        Some(CollectionFormat::Postman) => postman::import_postman(document),
        Some(CollectionFormat::Insomnia) => insomnia::import_insomnia(document),
        None => Err(ImportError::UnsupportedFormat),
    }
}

/// Builds a string map from foreign key/value pairs. Entries whose key is
/// not a string are dropped, and scalar values are stringified.
pub(crate) fn pairs_to_map<'a>(
    pairs: impl IntoIterator<Item = (&'a JsonValue, &'a JsonValue)>,
) -> OrderedMap {
    pairs
        .into_iter()
        .filter_map(|(key, value)| {
            let key = key.as_str()?;
            let value = match value {
                JsonValue::String(s) => s.clone(),
                JsonValue::Null => String::new(),
                other => other.to_string(),
            };
            Some((key.to_string(), value))
        })
        .collect()
}

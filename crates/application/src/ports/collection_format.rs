//! Collection format port
//!
//! Translates between stored collections and foreign collection documents.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use courier_domain::{Collection, NewRequestItem};

use crate::ApplicationResult;

/// A foreign document family the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Postman collection (v2.x).
    Postman,
    /// Insomnia export (v4).
    Insomnia,
}

impl fmt::Display for CollectionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postman => write!(f, "postman"),
            Self::Insomnia => write!(f, "insomnia"),
        }
    }
}

/// Warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    /// Something was skipped on purpose
    Info,
    /// Something could not be imported
    Warning,
}

/// Something the importer skipped or could not translate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    /// Location of the item in the source document (e.g. `"Users/Create"`)
    pub path: String,
    /// What happened
    pub message: String,
    /// Severity level
    pub severity: WarningSeverity,
}

impl ImportWarning {
    /// Create an info-level warning
    pub fn info(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: WarningSeverity::Info,
        }
    }

    /// Create a warning-level warning
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: WarningSeverity::Warning,
        }
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A foreign document mapped onto the native model, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedCollection {
    /// Detected source format
    pub format: CollectionFormat,
    /// Collection name
    pub name: String,
    /// Collection description
    pub description: Option<String>,
    /// Requests in document order
    pub requests: Vec<NewRequestItem>,
    /// Items that were skipped or only partially translated
    pub warnings: Vec<ImportWarning>,
}

/// Port for translating collection documents.
pub trait CollectionTranslator: Send + Sync {
    /// Detects the format of `document` and maps it.
    ///
    /// # Errors
    /// Returns `ApplicationError::UnsupportedFormat` if the document matches
    /// no known format.
    fn import(&self, document: &JsonValue) -> ApplicationResult<ImportedCollection>;

    /// Renders a stored collection as a Postman v2.1 document.
    fn export(&self, collection: &Collection) -> JsonValue;
}

//! JSON collection translator adapter.

use serde_json::Value as JsonValue;
use tracing::debug;

use courier_application::ApplicationResult;
use courier_application::ports::{CollectionTranslator, ImportedCollection};
use courier_domain::Collection;

use crate::export::PostmanExporter;
use crate::import::import_collection;

/// Imports Postman and Insomnia documents and exports Postman v2.1.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCollectionTranslator;

impl JsonCollectionTranslator {
    /// Creates a new translator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CollectionTranslator for JsonCollectionTranslator {
    fn import(&self, document: &JsonValue) -> ApplicationResult<ImportedCollection> {
        let imported = import_collection(document)?;
        debug!(
            format = %imported.format,
            requests = imported.requests.len(),
            warnings = imported.warnings.len(),
            "Translated collection document"
        );
        Ok(imported)
    }

    fn export(&self, collection: &Collection) -> JsonValue {
        PostmanExporter::export(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_application::ApplicationError;
    use courier_application::ports::CollectionFormat;
    use courier_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_postman_round_trip() {
        let translator = JsonCollectionTranslator::new();
        let imported = translator
            .import(&json!({
                "info": {"name": "X"},
                "item": [{"name": "R", "request": {"method": "GET", "url": "http://e.x", "header": []}}]
            }))
            .expect("postman document");
        assert_eq!(imported.format, CollectionFormat::Postman);

        let now = chrono::Utc::now();
        let mut collection = Collection::new("c".into(), imported.name, imported.description, now);
        for (i, request) in imported.requests.into_iter().enumerate() {
            collection.add_request(request.into_item(format!("r-{i}")), now);
        }

        let exported = translator.export(&collection);
        let item = &exported["item"][0];
        assert_eq!(exported["info"]["name"], "X");
        assert_eq!(item["name"], "R");
        assert_eq!(item["request"]["method"], HttpMethod::Get.as_str());
        assert_eq!(item["request"]["url"], "http://e.x");
    }

    #[test]
    fn test_empty_object_is_unsupported() {
        let result = JsonCollectionTranslator::new().import(&json!({}));
        assert!(matches!(result, Err(ApplicationError::UnsupportedFormat(_))));
    }
}

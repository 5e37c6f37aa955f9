//! Postman collection import.
//!
//! Top-level requests are mapped one to one. Folders are skipped rather
//! than flattened, and every skipped item is reported as a warning.

use serde_json::Value as JsonValue;

use courier_application::ports::{CollectionFormat, ImportWarning, ImportedCollection};
use courier_domain::{HttpMethod, NewRequestItem, OrderedMap, RequestBody};

use super::types::{PostmanBody, PostmanCollection, PostmanItem, PostmanPair};
use crate::import::{ImportError, pairs_to_map};

/// Collection name used when the document has none.
pub const DEFAULT_NAME: &str = "Imported Collection";
/// Collection description used when the document has none.
pub const DEFAULT_DESCRIPTION: &str = "Imported from Postman";

/// Returns true for documents shaped like a Postman collection: an `info`
/// object and an `item` array.
#[must_use]
pub fn is_postman_collection(document: &JsonValue) -> bool {
    document.get("info").is_some_and(JsonValue::is_object)
        && document.get("item").is_some_and(JsonValue::is_array)
}

/// Maps a Postman collection document.
///
/// # Errors
/// Returns an error if the `info` block cannot be read.
pub fn import_postman(document: &JsonValue) -> Result<ImportedCollection, ImportError> {
    let collection: PostmanCollection =
        serde_json::from_value(document.clone()).map_err(|e| ImportError::Invalid {
            format: CollectionFormat::Postman,
            message: e.to_string(),
        })?;

    let mut requests = Vec::new();
    let mut warnings = Vec::new();

    for (index, raw) in collection.item.iter().enumerate() {
        let path = raw
            .get("name")
            .and_then(JsonValue::as_str)
            .map_or_else(|| format!("item[{index}]"), str::to_string);

        if raw.get("item").is_some_and(JsonValue::is_array) {
            warnings.push(ImportWarning::info(
                path,
                "Folder skipped: nested folders are not imported",
            ));
            continue;
        }

        match map_item(raw, &path) {
            Ok((request, body_warning)) => {
                requests.push(request);
                warnings.extend(body_warning);
            }
            Err(warning) => warnings.push(warning),
        }
    }

    let name = collection
        .info
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let description = collection
        .info
        .description
        .and_then(|d| d.into_text())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    Ok(ImportedCollection {
        format: CollectionFormat::Postman,
        name,
        description: Some(description),
        requests,
        warnings,
    })
}

/// Maps one request item. A body that cannot be translated is dropped and
/// reported alongside the request.
fn map_item(
    raw: &JsonValue,
    path: &str,
) -> Result<(NewRequestItem, Option<ImportWarning>), ImportWarning> {
    let item: PostmanItem = serde_json::from_value(raw.clone())
        .map_err(|e| ImportWarning::warning(path, format!("Malformed item skipped: {e}")))?;
    let request = item
        .request
        .ok_or_else(|| ImportWarning::warning(path, "Item has no request and was skipped"))?;

    let method = match request.method.as_deref() {
        None => HttpMethod::Get,
        Some(method) => method
            .parse::<HttpMethod>()
            .map_err(|e| ImportWarning::warning(path, e.to_string()))?,
    };

    let headers = header_map(&request.header);
    let (body, body_warning) = match request.body.map(|body| map_body(body, path)) {
        Some(Ok(body)) => (body, None),
        Some(Err(warning)) => (None, Some(warning)),
        None => (None, None),
    };

    let item = NewRequestItem {
        name: item.name.unwrap_or_else(|| path.to_string()),
        url: request.url.raw(),
        method,
        headers: (!headers.is_empty()).then_some(headers),
        body,
        params: None,
        description: Some(
            request
                .description
                .and_then(|d| d.into_text())
                .unwrap_or_default(),
        ),
    };
    Ok((item, body_warning))
}

fn header_map(headers: &[PostmanPair]) -> OrderedMap {
    pairs_to_map(headers.iter().map(|h| (&h.key, &h.value)))
}

fn map_body(body: PostmanBody, path: &str) -> Result<Option<RequestBody>, ImportWarning> {
    match body.mode.as_deref() {
        Some("raw") => Ok(body.raw.map(|raw| RequestBody::parse_or_text(&raw))),
        Some("formdata") => Ok(Some(RequestBody::Form(pairs_to_map(
            body.formdata.iter().map(|p| (&p.key, &p.value)),
        )))),
        Some("urlencoded") => Ok(Some(RequestBody::Form(pairs_to_map(
            body.urlencoded.iter().map(|p| (&p.key, &p.value)),
        )))),
        None => Ok(None),
        Some(other) => Err(ImportWarning::warning(
            path,
            format!("Unsupported body mode '{other}'"),
        )),
    }
}

//! Insomnia export import.

use serde_json::Value as JsonValue;

use courier_application::ports::{CollectionFormat, ImportWarning, ImportedCollection};
use courier_domain::{HttpMethod, NewRequestItem, OrderedMap, RequestBody};

use super::types::{InsomniaBody, InsomniaExport, InsomniaPair, InsomniaRequest};
use crate::import::{ImportError, pairs_to_map};

/// Name given to every collection imported from Insomnia.
pub const COLLECTION_NAME: &str = "Insomnia Import";

const REQUEST_TYPE: &str = "request";

/// Returns true for documents shaped like an Insomnia export.
#[must_use]
pub fn is_insomnia_export(document: &JsonValue) -> bool {
    document.get("_type").and_then(JsonValue::as_str) == Some("export")
        && document.get("resources").is_some_and(JsonValue::is_array)
}

/// Maps the request resources of an Insomnia export. Workspaces, folders
/// and environments are ignored.
///
/// # Errors
/// Returns an error if the document cannot be read.
pub fn import_insomnia(document: &JsonValue) -> Result<ImportedCollection, ImportError> {
    let export: InsomniaExport =
        serde_json::from_value(document.clone()).map_err(|e| ImportError::Invalid {
            format: CollectionFormat::Insomnia,
            message: e.to_string(),
        })?;

    let mut requests = Vec::new();
    let mut warnings = Vec::new();

    for (index, raw) in export.resources.iter().enumerate() {
        if raw.get("_type").and_then(JsonValue::as_str) != Some(REQUEST_TYPE) {
            continue;
        }
        let path = raw
            .get("name")
            .and_then(JsonValue::as_str)
            .map_or_else(|| format!("resources[{index}]"), str::to_string);

        let request: InsomniaRequest = match serde_json::from_value(raw.clone()) {
            Ok(request) => request,
            Err(e) => {
                warnings.push(ImportWarning::warning(path, format!("Malformed request skipped: {e}")));
                continue;
            }
        };

        let method = match request.method.as_deref() {
            None => HttpMethod::Get,
            Some(method) => match method.parse::<HttpMethod>() {
                Ok(method) => method,
                Err(e) => {
                    warnings.push(ImportWarning::warning(path, e.to_string()));
                    continue;
                }
            },
        };

        requests.push(map_request(request, method, path));
    }

    Ok(ImportedCollection {
        format: CollectionFormat::Insomnia,
        name: COLLECTION_NAME.to_string(),
        description: None,
        requests,
        warnings,
    })
}

fn map_request(request: InsomniaRequest, method: HttpMethod, path: String) -> NewRequestItem {
    let headers = pair_map(&request.headers);
    let params = pair_map(&request.parameters);

    NewRequestItem {
        name: request.name.unwrap_or(path),
        url: request.url.unwrap_or_default(),
        method,
        headers: (!headers.is_empty()).then_some(headers),
        body: request.body.and_then(map_body),
        params: (!params.is_empty()).then_some(params),
        description: request.description.filter(|d| !d.is_empty()),
    }
}

fn pair_map(pairs: &[InsomniaPair]) -> OrderedMap {
    pairs_to_map(pairs.iter().map(|p| (&p.name, &p.value)))
}

fn map_body(body: InsomniaBody) -> Option<RequestBody> {
    if let Some(text) = body.text.filter(|t| !t.is_empty()) {
        return Some(RequestBody::parse_or_text(&text));
    }
    let fields = pair_map(&body.params);
    (!fields.is_empty()).then_some(RequestBody::Form(fields))
}

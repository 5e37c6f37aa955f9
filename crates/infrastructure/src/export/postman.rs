//! Postman Collection v2.1 exporter.
//!
//! Every stored request becomes a top-level item. Form and JSON bodies are
//! rendered as pretty-printed raw JSON, since Postman has no direct
//! counterpart for a structured body.

use serde::Serialize;
use serde_json::Value as JsonValue;

use courier_domain::{Collection, RequestBody, RequestItem};

/// Schema URL stamped into every exported document.
pub const POSTMAN_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Postman format exporter.
pub struct PostmanExporter;

impl PostmanExporter {
    /// Renders `collection` as a Postman v2.1 document.
    #[must_use]
    pub fn export(collection: &Collection) -> JsonValue {
        let document = PostmanDocument {
            info: PostmanInfo {
                postman_id: &collection.id,
                name: &collection.name,
                description: collection.description.as_deref().unwrap_or_default(),
                schema: POSTMAN_SCHEMA,
            },
            item: collection.requests.iter().map(Self::build_item).collect(),
        };
        // Only strings, arrays and maps with string keys are serialized here.
        serde_json::to_value(document).unwrap_or(JsonValue::Null)
    }

    fn build_item(request: &RequestItem) -> PostmanItem<'_> {
        PostmanItem {
            name: &request.name,
            request: PostmanRequest {
                method: request.method.as_str(),
                header: request
                    .headers
                    .iter()
                    .flatten()
                    .map(|(key, value)| PostmanHeader {
                        key,
                        value,
                        kind: "text",
                    })
                    .collect(),
                url: &request.url,
                description: request.description.as_deref().unwrap_or_default(),
                body: request.body.as_ref().map(Self::build_body),
            },
        }
    }

    fn build_body(body: &RequestBody) -> PostmanBody {
        match body {
            RequestBody::Text(text) => PostmanBody {
                mode: "raw",
                raw: text.clone(),
                options: None,
            },
            structured => PostmanBody {
                mode: "raw",
                raw: serde_json::to_string_pretty(&structured.to_plain_json())
                    .unwrap_or_default(),
                options: Some(PostmanBodyOptions {
                    raw: PostmanRawOptions { language: "json" },
                }),
            },
        }
    }
}

#[derive(Serialize)]
struct PostmanDocument<'a> {
    info: PostmanInfo<'a>,
    item: Vec<PostmanItem<'a>>,
}

#[derive(Serialize)]
struct PostmanInfo<'a> {
    #[serde(rename = "_postman_id")]
    postman_id: &'a str,
    name: &'a str,
    description: &'a str,
    schema: &'static str,
}

#[derive(Serialize)]
struct PostmanItem<'a> {
    name: &'a str,
    request: PostmanRequest<'a>,
}

#[derive(Serialize)]
struct PostmanRequest<'a> {
    method: &'static str,
    header: Vec<PostmanHeader<'a>>,
    url: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<PostmanBody>,
}

#[derive(Serialize)]
struct PostmanHeader<'a> {
    key: &'a str,
    value: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct PostmanBody {
    mode: &'static str,
    raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<PostmanBodyOptions>,
}

#[derive(Serialize)]
struct PostmanBodyOptions {
    raw: PostmanRawOptions,
}

#[derive(Serialize)]
struct PostmanRawOptions {
    language: &'static str,
}

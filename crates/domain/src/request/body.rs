//! Request body sum type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::OrderedMap;

/// Key marking a form body on the wire: `{"$form": {"field": "value"}}`.
pub const FORM_MARKER: &str = "$form";

/// Request body with explicit format.
///
/// On the wire a body is any JSON value:
/// - a JSON string is a raw [`RequestBody::Text`] body,
/// - an object of the exact shape `{"$form": {..string values..}}` is a
///   [`RequestBody::Form`] body,
/// - anything else is a structured [`RequestBody::Json`] body.
///
/// `$form` is therefore reserved: a JSON payload that is literally
/// `{"$form": {..string values..}}` cannot be sent as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum RequestBody {
    /// Raw text body. May contain `{{variables}}`.
    Text(String),
    /// Structured JSON body (object, array, number, bool or null).
    Json(JsonValue),
    /// Form fields, sent as `application/x-www-form-urlencoded`.
    Form(OrderedMap),
}

impl RequestBody {
    /// Creates a text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Parses raw text as JSON, falling back to a text body when it is not
    /// valid JSON. Used by the importers for `raw` bodies.
    #[must_use]
    pub fn parse_or_text(raw: &str) -> Self {
        match serde_json::from_str::<JsonValue>(raw) {
            Ok(JsonValue::String(s)) => Self::Text(s),
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    /// Returns true when there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Json(value) => value.is_null(),
            Self::Form(fields) => fields.is_empty(),
        }
    }

    /// Returns true for bodies that were not supplied as a raw string.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    /// Returns the body as a JSON value, with form bodies rendered as a
    /// plain object of their fields.
    #[must_use]
    pub fn to_plain_json(&self) -> JsonValue {
        match self {
            Self::Text(text) => JsonValue::String(text.clone()),
            Self::Json(value) => value.clone(),
            Self::Form(fields) => fields_to_object(fields),
        }
    }
}

fn fields_to_object(fields: &OrderedMap) -> JsonValue {
    JsonValue::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
            .collect(),
    )
}

fn form_fields(object: &Map<String, JsonValue>) -> Option<OrderedMap> {
    if object.len() != 1 {
        return None;
    }
    let fields = object.get(FORM_MARKER)?.as_object()?;
    fields
        .iter()
        .map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
        .collect()
}

impl From<JsonValue> for RequestBody {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::String(text) => Self::Text(text),
            JsonValue::Object(object) => match form_fields(&object) {
                Some(fields) => Self::Form(fields),
                None => Self::Json(JsonValue::Object(object)),
            },
            other => Self::Json(other),
        }
    }
}

impl From<RequestBody> for JsonValue {
    fn from(body: RequestBody) -> Self {
        match body {
            RequestBody::Text(text) => Self::String(text),
            RequestBody::Json(value) => value,
            RequestBody::Form(fields) => {
                let mut marker = Map::new();
                marker.insert(FORM_MARKER.to_string(), fields_to_object(&fields));
                Self::Object(marker)
            }
        }
    }
}

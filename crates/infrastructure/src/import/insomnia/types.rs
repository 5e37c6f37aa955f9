//! Insomnia export (v4) type definitions.

#![allow(missing_docs)]

use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Deserialize)]
pub struct InsomniaExport {
    /// Resources are kept raw and filtered by `_type` before parsing.
    #[serde(default)]
    pub resources: Vec<JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsomniaRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub headers: Vec<InsomniaPair>,
    #[serde(default)]
    pub parameters: Vec<InsomniaPair>,
    #[serde(default)]
    pub body: Option<InsomniaBody>,
}

/// A `name`/`value` entry of a header or parameter list.
#[derive(Debug, Clone, Deserialize)]
pub struct InsomniaPair {
    #[serde(default)]
    pub name: JsonValue,
    #[serde(default)]
    pub value: JsonValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsomniaBody {
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub params: Vec<InsomniaPair>,
}

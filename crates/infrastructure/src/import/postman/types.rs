//! Postman Collection v2.x Type Definitions
//!
//! Only the parts the importer reads are modeled. Everything is optional
//! or defaulted so that exports from different Postman versions parse.

#![allow(missing_docs)]

use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    /// Items are kept raw so that one malformed item cannot fail the
    /// whole document.
    #[serde(default)]
    pub item: Vec<JsonValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "_postman_id", default)]
    pub postman_id: Option<String>,
    #[serde(default)]
    pub description: Option<PostmanDescription>,
    #[serde(default)]
    pub schema: Option<String>,
}

/// Descriptions are either plain strings or `{content, type}` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostmanDescription {
    Text(String),
    Structured {
        #[serde(default)]
        content: Option<String>,
    },
}

impl PostmanDescription {
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured { content } => content,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostmanItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub request: Option<PostmanRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostmanRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: PostmanUrl,
    #[serde(default)]
    pub header: Vec<PostmanPair>,
    #[serde(default)]
    pub body: Option<PostmanBody>,
    #[serde(default)]
    pub description: Option<PostmanDescription>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum PostmanUrl {
    #[default]
    Empty,
    Simple(String),
    Structured {
        #[serde(default)]
        raw: Option<String>,
    },
}

impl PostmanUrl {
    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Simple(s) => s.clone(),
            Self::Structured { raw } => raw.clone().unwrap_or_default(),
        }
    }
}

/// A `key`/`value` entry of a header list or form body.
#[derive(Debug, Clone, Deserialize)]
pub struct PostmanPair {
    #[serde(default)]
    pub key: JsonValue,
    #[serde(default)]
    pub value: JsonValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostmanBody {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub urlencoded: Vec<PostmanPair>,
    #[serde(default)]
    pub formdata: Vec<PostmanPair>,
}

//! Deterministic JSON serialization for persisted documents.
//!
//! Every document is written with:
//! - 2-space indentation
//! - a trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;

//! HTTP request domain types

mod body;
mod method;
mod spec;

pub use body::{FORM_MARKER, RequestBody};
pub use method::HttpMethod;
pub use spec::{DEFAULT_TIMEOUT_MS, RequestSpec};

use std::collections::BTreeMap;

/// Ordered key-value map for deterministic serialization.
/// Used for headers, query parameters and form fields.
pub type OrderedMap = BTreeMap<String, String>;

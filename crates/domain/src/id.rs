//! ID generation utilities.

use uuid::Uuid;

/// A UUID string type for stable identifiers.
///
/// Ids are opaque to callers; using `String` keeps imported ids
/// (Postman, Insomnia) and generated ids in the same shape.
pub type Id = String;

/// Generates a new identifier.
///
/// UUID v7 embeds a timestamp, so ids sort in creation order. The
/// environment store relies on this when listing documents.
#[must_use]
pub fn generate_id() -> Id {
    Uuid::now_v7().to_string()
}

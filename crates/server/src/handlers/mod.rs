//! Route handlers, one module per resource.

pub mod collections;
pub mod environments;
pub mod execute;
pub mod health;
pub mod history;

use axum::http::{Method, Uri};

use crate::responses::ApiError;

/// Answers unknown routes with the envelope.
#[allow(clippy::unused_async)]
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(&format!("Route {method} {}", uri.path()))
}

//! Liveness probe.

use axum::Json;
use serde::Serialize;

/// Health status payload.
#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
}

/// `GET /health`
#[allow(clippy::unused_async)]
pub async fn handle() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

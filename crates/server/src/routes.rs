//! Router construction.

use axum::Router;
use axum::http::HeaderName;
use axum::routing::{get, post, put};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, collections, environments, execute, health, history};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the full router with its middleware stack.
pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health::handle))
        .route("/execute", post(execute::handle))
        .route("/history", get(history::list).delete(history::clear))
        .route("/environments", get(environments::list).post(environments::create))
        .route("/environments/active", get(environments::active))
        .route(
            "/environments/{id}",
            get(environments::get)
                .put(environments::update)
                .delete(environments::delete),
        )
        .route("/environments/{id}/activate", post(environments::activate))
        .route("/collections", get(collections::list).post(collections::create))
        .route("/collections/import", post(collections::import))
        .route(
            "/collections/{id}",
            get(collections::get)
                .put(collections::update)
                .delete(collections::delete),
        )
        .route("/collections/{id}/export", get(collections::export))
        .route("/collections/{id}/requests", post(collections::add_request))
        .route(
            "/collections/{id}/requests/{request_id}",
            put(collections::update_request).delete(collections::delete_request),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(CorsLayer::permissive()),
        )
}

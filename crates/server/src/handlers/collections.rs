//! Collection endpoints, including import and export.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value as JsonValue;

use courier_application::{ImportReport, NewCollection};
use courier_domain::{Collection, CollectionPatch, NewRequestItem, RequestItem, RequestItemPatch};

use crate::responses::{ApiError, ApiJson, ApiResponse, ApiResult, failure};
use crate::state::AppState;

const COLLECTION: &str = "Collection";
const REQUEST: &str = "Request";

/// `GET /collections`
pub async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Collection>>> {
    state.collections.list().await.map(ApiResponse::ok).map_err(failure(&state))
}

/// `GET /collections/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Collection>> {
    state
        .collections
        .get_by_id(&id)
        .await
        .map_err(failure(&state))?
        .map(ApiResponse::ok)
        .ok_or_else(|| ApiError::not_found(COLLECTION))
}

/// `POST /collections`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCollection>,
) -> ApiResult<ApiResponse<Collection>> {
    state
        .collections
        .create(input)
        .await
        .map(|collection| ApiResponse::created(collection).with_message("Collection created"))
        .map_err(failure(&state))
}

/// `PUT /collections/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<CollectionPatch>,
) -> ApiResult<ApiResponse<Collection>> {
    state
        .collections
        .update(&id, patch)
        .await
        .map_err(failure(&state))?
        .map(|collection| ApiResponse::ok(collection).with_message("Collection updated"))
        .ok_or_else(|| ApiError::not_found(COLLECTION))
}

/// `DELETE /collections/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state
        .collections
        .delete(&id)
        .await
        .map_err(failure(&state))?
        .map(|_| ApiResponse::message("Collection deleted"))
        .ok_or_else(|| ApiError::not_found(COLLECTION))
}

/// `POST /collections/{cid}/requests`
///
/// A body of exactly `{"$form": {..}}` is stored as a form body.
pub async fn add_request(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
    ApiJson(request): ApiJson<NewRequestItem>,
) -> ApiResult<ApiResponse<RequestItem>> {
    state
        .collections
        .add_request(&collection_id, request)
        .await
        .map_err(failure(&state))?
        .map(|item| ApiResponse::created(item).with_message("Request added"))
        .ok_or_else(|| ApiError::not_found(COLLECTION))
}

/// `PUT /collections/{cid}/requests/{rid}`
pub async fn update_request(
    State(state): State<AppState>,
    Path((collection_id, request_id)): Path<(String, String)>,
    ApiJson(patch): ApiJson<RequestItemPatch>,
) -> ApiResult<ApiResponse<RequestItem>> {
    state
        .collections
        .update_request(&collection_id, &request_id, patch)
        .await
        .map_err(failure(&state))?
        .map(|item| ApiResponse::ok(item).with_message("Request updated"))
        .ok_or_else(|| ApiError::not_found(REQUEST))
}

/// `DELETE /collections/{cid}/requests/{rid}`
pub async fn delete_request(
    State(state): State<AppState>,
    Path((collection_id, request_id)): Path<(String, String)>,
) -> ApiResult<ApiResponse<()>> {
    state
        .collections
        .delete_request(&collection_id, &request_id)
        .await
        .map_err(failure(&state))?
        .map(|_| ApiResponse::message("Request deleted"))
        .ok_or_else(|| ApiError::not_found(REQUEST))
}

/// `POST /collections/import`
pub async fn import(
    State(state): State<AppState>,
    ApiJson(document): ApiJson<JsonValue>,
) -> ApiResult<ApiResponse<ImportReport>> {
    state
        .importer
        .execute(&document)
        .await
        .map(|report| {
            let message = format!(
                "Imported {} request(s) from {}",
                report.collection.requests.len(),
                report.format
            );
            ApiResponse::created(report).with_message(message)
        })
        .map_err(failure(&state))
}

/// `GET /collections/{id}/export`
///
/// Answers with the bare Postman document, without the envelope.
pub async fn export(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JsonValue>> {
    state
        .exporter
        .execute(&id)
        .await
        .map_err(failure(&state))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(COLLECTION))
}

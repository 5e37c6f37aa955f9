//! Environment endpoints.

use axum::extract::{Path, State};

use courier_application::{EnvironmentRecord, NewEnvironment};
use courier_domain::EnvironmentPatch;

use crate::responses::{ApiError, ApiJson, ApiResponse, ApiResult, failure};
use crate::state::AppState;

const RESOURCE: &str = "Environment";

/// `GET /environments`
pub async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<EnvironmentRecord>>> {
    state.environments.list().await.map(ApiResponse::ok).map_err(failure(&state))
}

/// `GET /environments/active`
pub async fn active(State(state): State<AppState>) -> ApiResult<ApiResponse<EnvironmentRecord>> {
    state
        .environments
        .get_active()
        .await
        .map_err(failure(&state))?
        .map(ApiResponse::ok)
        .ok_or_else(|| ApiError::not_found("Active environment"))
}

/// `GET /environments/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<EnvironmentRecord>> {
    state
        .environments
        .get(&id)
        .await
        .map_err(failure(&state))?
        .map(ApiResponse::ok)
        .ok_or_else(|| ApiError::not_found(RESOURCE))
}

/// `POST /environments`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewEnvironment>,
) -> ApiResult<ApiResponse<EnvironmentRecord>> {
    state
        .environments
        .create(input)
        .await
        .map(|record| ApiResponse::created(record).with_message("Environment created"))
        .map_err(failure(&state))
}

/// `PUT /environments/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EnvironmentPatch>,
) -> ApiResult<ApiResponse<EnvironmentRecord>> {
    state
        .environments
        .update(&id, patch)
        .await
        .map_err(failure(&state))?
        .map(|record| ApiResponse::ok(record).with_message("Environment updated"))
        .ok_or_else(|| ApiError::not_found(RESOURCE))
}

/// `DELETE /environments/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state
        .environments
        .delete(&id)
        .await
        .map_err(failure(&state))?
        .map(|_| ApiResponse::message("Environment deleted"))
        .ok_or_else(|| ApiError::not_found(RESOURCE))
}

/// `POST /environments/{id}/activate`
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<EnvironmentRecord>> {
    state
        .environments
        .set_active(&id)
        .await
        .map_err(failure(&state))?
        .map(|record| ApiResponse::ok(record).with_message("Environment activated"))
        .ok_or_else(|| ApiError::not_found(RESOURCE))
}

//! History log.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use courier_application::HistoryQuery;
use courier_domain::HistoryPage;

use crate::responses::{ApiError, ApiResponse, ApiResult, failure};
use crate::state::AppState;

/// `GET /history?limit&offset`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<ApiResponse<HistoryPage>> {
    let expose = state.expose_error_details;
    let Query(query) =
        query.map_err(|r| ApiError::rejected(r.status(), r.body_text(), expose))?;
    state
        .history
        .list(query)
        .await
        .map(ApiResponse::ok)
        .map_err(failure(&state))
}

/// `DELETE /history`
pub async fn clear(State(state): State<AppState>) -> ApiResult<ApiResponse<()>> {
    state
        .history
        .clear()
        .await
        .map(|()| ApiResponse::message("History cleared"))
        .map_err(failure(&state))
}

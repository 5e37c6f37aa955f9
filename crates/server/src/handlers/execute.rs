//! Request execution.

use axum::extract::State;

use courier_application::ExecuteRequestInput;
use courier_domain::ExecutionResult;

use crate::responses::{ApiJson, ApiResponse, ApiResult, failure};
use crate::state::AppState;

/// `POST /execute`
///
/// A body of exactly `{"$form": {..}}` is sent as form fields, not JSON.
pub async fn handle(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ExecuteRequestInput>,
) -> ApiResult<ApiResponse<ExecutionResult>> {
    state
        .executor
        .execute(input)
        .await
        .map(ApiResponse::ok)
        .map_err(failure(&state))
}

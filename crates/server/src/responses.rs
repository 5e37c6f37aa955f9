//! The `{success, message?, data?, error?}` response envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{error, warn};

use courier_application::ApplicationError;

use crate::state::AppState;

/// A successful envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip)]
    status: StatusCode,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 OK` carrying `data`.
    pub const fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// `201 Created` carrying `data`.
    pub const fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Adds a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// `200 OK` with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// A failed envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    fn with_detail(mut self, detail: String, expose: bool) -> Self {
        if expose {
            self.error = Some(detail);
        }
        self
    }

    /// Maps an application error to its status code and envelope.
    ///
    /// The `error` detail is only filled in when `expose` is set.
    #[must_use]
    pub fn from_application(err: ApplicationError, expose: bool) -> Self {
        let detail = err.to_string();
        match err {
            ApplicationError::Validation(message) => {
                Self::new(StatusCode::BAD_REQUEST, message).with_detail(detail, expose)
            }
            ApplicationError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, detail.clone()).with_detail(detail, expose)
            }
            ApplicationError::UnsupportedFormat(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Unsupported collection format")
                    .with_detail(detail, expose)
            }
            ApplicationError::Upstream {
                status,
                message,
                data,
            } => {
                let status = status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                warn!(status = status.as_u16(), %message, "upstream request failed");
                Self {
                    data,
                    ..Self::new(status, message)
                }
                .with_detail(detail, expose)
            }
            ApplicationError::Persistence(_) => {
                error!(error = %detail, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to access storage")
                    .with_detail(detail, expose)
            }
            ApplicationError::Internal(_) => {
                error!(error = %detail, "internal failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    .with_detail(detail, expose)
            }
        }
    }

    /// `404` for a missing resource.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{resource} not found"))
    }

    /// Maps an extractor rejection, keeping its status code.
    #[must_use]
    pub fn rejected(status: StatusCode, detail: String, expose: bool) -> Self {
        Self::new(status, "Invalid request").with_detail(detail, expose)
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Returns a mapper from application errors to envelopes, honoring the
/// state's detail setting.
pub fn failure(state: &AppState) -> impl Fn(ApplicationError) -> ApiError + use<> {
    let expose = state.expose_error_details;
    move |err| ApiError::from_application(err, expose)
}

/// JSON body extractor whose rejections use the envelope.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let expose = AppState::from_ref(state).expose_error_details;
                Err(json_rejection(&rejection, expose))
            }
        }
    }
}

fn json_rejection(rejection: &JsonRejection, expose: bool) -> ApiError {
    let mut error = ApiError::rejected(rejection.status(), rejection.body_text(), expose);
    error.message = "Invalid JSON body".to_string();
    error
}

//! Shared response plumbing for route handlers.

use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::LifecycleError;
use tracing::error;

/// A service failure rendered as the standard error envelope.
#[derive(Debug)]
pub struct ApiError(pub LifecycleError);

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        Self(err)
    }
}

/// HTTP status for each failure kind.
pub fn status_for(err: &LifecycleError) -> StatusCode {
    match err {
        LifecycleError::Validation(_)
        | LifecycleError::AlreadyDecided
        | LifecycleError::AlreadyRejected
        | LifecycleError::InvalidTransition { .. }
        | LifecycleError::EmptyCode => StatusCode::BAD_REQUEST,
        LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
        LifecycleError::Conflict(_)
        | LifecycleError::InUse(_)
        | LifecycleError::NamingExhausted { .. } => StatusCode::CONFLICT,
        LifecycleError::RemoteUnavailable(_) => StatusCode::BAD_GATEWAY,
        LifecycleError::PartialPublish { .. } | LifecycleError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(error = %self.0, %status, "Request failed");
        }
        (status, Json(ApiResponse::<Empty>::error(self.0.to_string()))).into_response()
    }
}

/// Shorthand for an error envelope with an explicit status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

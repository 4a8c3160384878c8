use crate::response::{ApiResponse, Empty};
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

/// DELETE /subjects/{id}
///
/// Admin only.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
/// - `409 Conflict` while practicals or submissions still reference the subject
pub async fn delete_subject(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    app_state.subjects().delete(id).await?;
    Ok(Json(ApiResponse::success(Empty::default(), "Subject deleted successfully")))
}

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use db::models::submission::Model as SubmissionModel;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: String,
}

/// PUT /submissions/{id}/reject
///
/// ### Request Body
/// ```json
/// { "reason": "incomplete" }
/// ```
///
/// ### Responses
/// - `200 OK` with the rejected submission
/// - `400 Bad Request` (blank reason, already rejected, or already approved)
/// - `404 Not Found`
pub async fn reject_submission(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<ApiResponse<SubmissionModel>>, ApiError> {
    let submission = app_state
        .submissions()
        .reject(&user.identity(), id, &req.reason)
        .await?;

    Ok(Json(ApiResponse::success(submission, "Submission rejected")))
}

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::practical::Model as PracticalModel;
use db::models::submission::Model as SubmissionModel;
use serde::{Deserialize, Serialize};
use services::submission_service::CreateSubmission;

#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub name: String,
    pub email: String,
    /// Subject id.
    pub subject: i64,
    pub title: String,
    pub description: String,
    pub code: String,
    pub extension: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub practical: PracticalModel,
}

/// POST /submissions
///
/// Records a student submission in the `pending` state.
///
/// ### Request Body
/// ```json
/// {
///   "name": "A",
///   "email": "a@x.com",
///   "subject": 1,
///   "title": "Loop Demo",
///   "description": "d",
///   "code": "print(1)",
///   "extension": ".py"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the submission
/// - `400 Bad Request` with the failing fields joined in `message`, or an unknown subject
pub async fn create_submission(
    State(app_state): State<AppState>,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionModel>>), ApiError> {
    let submission = app_state
        .submissions()
        .submit(CreateSubmission {
            name: req.name,
            email: req.email,
            subject_id: req.subject,
            title: req.title,
            description: req.description,
            code: req.code,
            extension: req.extension,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(submission, "Submission received")),
    ))
}

/// POST /submissions/{id}/approve
///
/// Publishes the submission's code to the repository and creates a practical from it.
/// The submitter is e-mailed afterwards; a failed e-mail does not fail the request.
///
/// ### Responses
/// - `200 OK` with `{ "practical": { ... } }`
/// - `400 Bad Request` (already decided, rejected, or empty code)
/// - `404 Not Found` (submission or its subject)
/// - `409 Conflict` (no free file name)
/// - `500 Internal Server Error` (published but not recorded; `message` names the orphaned path)
/// - `502 Bad Gateway` (repository unreachable; the submission stays pending)
pub async fn approve_submission(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ApprovalResponse>>, ApiError> {
    let practical = app_state
        .submissions()
        .approve(&user.identity(), id)
        .await?;

    Ok(Json(ApiResponse::success(
        ApprovalResponse { practical },
        "Submission approved and published",
    )))
}

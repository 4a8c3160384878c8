use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{Json, extract::State};
use db::models::subject::Model as SubjectModel;
use db::models::submission::Model as SubmissionModel;
use serde::Serialize;

/// A submission with its subject expanded.
#[derive(Debug, Serialize)]
pub struct PendingSubmission {
    #[serde(flatten)]
    pub submission: SubmissionModel,
    pub subject: Option<SubjectModel>,
}

/// GET /submissions
///
/// All submissions in every state, oldest first. Admin only.
pub async fn list_submissions(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SubmissionModel>>>, ApiError> {
    let submissions = app_state.submissions().list().await?;
    Ok(Json(ApiResponse::success(submissions, "Submissions retrieved successfully")))
}

/// GET /submissions/pending
///
/// Submissions awaiting a decision, each with its subject. Admin only.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 7,
///       "name": "A",
///       "email": "a@x.com",
///       "subject_id": 1,
///       "title": "Loop Demo",
///       "description": "d",
///       "code": "print(1)",
///       "extension": ".py",
///       "status": "pending",
///       "rejection_reason": null,
///       "created_at": "...",
///       "updated_at": "...",
///       "subject": { "id": 1, "name": "DSA", "code": null, "semester": "SEM3", "created_at": "...", "updated_at": "..." }
///     }
///   ],
///   "message": "Pending submissions retrieved successfully"
/// }
/// ```
pub async fn list_pending_submissions(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PendingSubmission>>>, ApiError> {
    let pending = app_state
        .submissions()
        .list_pending()
        .await?
        .into_iter()
        .map(|(submission, subject)| PendingSubmission { submission, subject })
        .collect();

    Ok(Json(ApiResponse::success(
        pending,
        "Pending submissions retrieved successfully",
    )))
}

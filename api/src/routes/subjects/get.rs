use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use db::models::subject::Model as SubjectModel;

/// GET /subjects
///
/// Lists every subject, ordered by semester and then name.
///
/// ### Response
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "id": 1, "name": "DSA", "code": "210244", "semester": "SEM3", "created_at": "...", "updated_at": "..." }
///   ],
///   "message": "Subjects retrieved successfully"
/// }
/// ```
pub async fn list_subjects(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SubjectModel>>>, ApiError> {
    let subjects = app_state.subjects().list().await?;
    Ok(Json(ApiResponse::success(subjects, "Subjects retrieved successfully")))
}

/// GET /subjects/{id}
///
/// - `200 OK` with the subject
/// - `404 Not Found`
pub async fn get_subject(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SubjectModel>>, ApiError> {
    let subject = app_state.subjects().get(id).await?;
    Ok(Json(ApiResponse::success(subject, "Subject retrieved successfully")))
}

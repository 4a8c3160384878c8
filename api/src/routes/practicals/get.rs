use super::common::PracticalResponse;
use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use db::models::practical::Model as PracticalModel;
use services::practical_service::PracticalWithCode;

/// GET /practicals
///
/// Lists all practicals with their subject.
///
/// ### Response
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 3,
///       "subject_id": 1,
///       "title": "Loop Demo",
///       "description": "Counting loop",
///       "code_link": "https://github.com/owner/repo/blob/main/CS/SEM3/DSA/loop_demo.py",
///       "created_at": "...",
///       "updated_at": "...",
///       "subject": { "id": 1, "name": "DSA", "code": null, "semester": "SEM3", "created_at": "...", "updated_at": "..." }
///     }
///   ],
///   "message": "Practicals retrieved successfully"
/// }
/// ```
pub async fn list_practicals(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PracticalResponse>>>, ApiError> {
    let practicals = app_state
        .practicals()
        .list()
        .await?
        .into_iter()
        .map(PracticalResponse::from)
        .collect();

    Ok(Json(ApiResponse::success(practicals, "Practicals retrieved successfully")))
}

/// GET /practicals/{id}
///
/// - `200 OK` with the practical
/// - `404 Not Found`
pub async fn get_practical(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PracticalModel>>, ApiError> {
    let practical = app_state.practicals().get(id).await?;
    Ok(Json(ApiResponse::success(practical, "Practical retrieved successfully")))
}

/// GET /practicals/subject/{subject_id}
///
/// Lists a subject's practicals with their code fetched from the repository. A file
/// that cannot be fetched comes back with `"code": null`.
///
/// ### Response
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 3,
///       "subject_id": 1,
///       "title": "Loop Demo",
///       "description": "Counting loop",
///       "code_link": "https://github.com/owner/repo/blob/main/CS/SEM3/DSA/loop_demo.py",
///       "created_at": "...",
///       "updated_at": "...",
///       "raw_url": "https://raw.githubusercontent.com/owner/repo/main/CS/SEM3/DSA/loop_demo.py",
///       "code": "print(1)"
///     }
///   ],
///   "message": "Practicals retrieved successfully"
/// }
/// ```
/// - `404 Not Found` for an unknown subject
pub async fn list_subject_practicals(
    State(app_state): State<AppState>,
    Path(subject_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<PracticalWithCode>>>, ApiError> {
    let practicals = app_state.practicals().list_for_subject(subject_id).await?;
    Ok(Json(ApiResponse::success(practicals, "Practicals retrieved successfully")))
}

use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use db::models::subject::Model as SubjectModel;
use serde::{Deserialize, Deserializer};
use services::subject_service::UpdateSubject;

#[derive(Debug, Deserialize)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    /// Absent keeps the code, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub code: Option<Option<String>>,
    pub semester: Option<String>,
}

/// Distinguishes an explicit `null` from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// PUT /subjects/{id}
///
/// Partial update. Admin only.
///
/// ### Request Body
/// ```json
/// { "semester": "SEM4", "code": null }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated subject
/// - `400 Bad Request` for blank fields
/// - `404 Not Found`
pub async fn update_subject(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSubjectRequest>,
) -> Result<Json<ApiResponse<SubjectModel>>, ApiError> {
    let subject = app_state
        .subjects()
        .update(
            id,
            UpdateSubject {
                name: req.name,
                code: req.code,
                semester: req.semester,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(subject, "Subject updated successfully")))
}

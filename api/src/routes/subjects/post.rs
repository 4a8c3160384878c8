use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use db::models::subject::Model as SubjectModel;
use serde::Deserialize;
use services::subject_service::CreateSubject;

#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: Option<String>,
    pub semester: String,
}

/// POST /subjects
///
/// Creates a subject. Admin only.
///
/// ### Request Body
/// ```json
/// { "name": "DSA", "code": "210244", "semester": "SEM3" }
/// ```
///
/// ### Responses
/// - `201 Created` with the subject
/// - `400 Bad Request` when `name` or `semester` is blank
pub async fn create_subject(
    State(app_state): State<AppState>,
    Json(req): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubjectModel>>), ApiError> {
    let subject = app_state
        .subjects()
        .create(CreateSubject {
            name: req.name,
            code: req.code,
            semester: req.semester,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(subject, "Subject created successfully")),
    ))
}

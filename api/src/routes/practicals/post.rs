use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::practical::Model as PracticalModel;
use serde::Deserialize;
use services::practical_service::CreatePractical;

#[derive(Debug, Deserialize)]
pub struct CreatePracticalRequest {
    /// Subject id.
    pub subject: i64,
    pub title: String,
    pub description: String,
    pub code: String,
    pub extension: Option<String>,
}

/// POST /practicals
///
/// Publishes the code to the repository under the subject's folder and records the
/// practical. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "subject": 1,
///   "title": "Bubble Sort",
///   "description": "Sorts in place",
///   "code": "def sort(xs): ...",
///   "extension": ".py"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the practical
/// - `400 Bad Request` (blank fields, bad extension)
/// - `404 Not Found` (unknown subject)
/// - `502 Bad Gateway` (repository unreachable)
pub async fn create_practical(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreatePracticalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PracticalModel>>), ApiError> {
    let practical = app_state
        .practicals()
        .create(
            &user.identity(),
            CreatePractical {
                subject_id: req.subject,
                title: req.title,
                description: req.description,
                code: req.code,
                extension: req.extension,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(practical, "Practical created successfully")),
    ))
}

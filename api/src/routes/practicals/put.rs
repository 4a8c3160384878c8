use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use db::models::practical::Model as PracticalModel;
use serde::Deserialize;
use services::practical_service::UpdatePractical;

#[derive(Debug, Deserialize)]
pub struct UpdatePracticalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
}

/// PUT /practicals/{id}
///
/// Updates the descriptive fields and, when `code` is present, rewrites the published
/// file. Admin only.
///
/// ### Request Body
/// ```json
/// { "title": "Bubble Sort (v2)", "code": "def sort(xs): ..." }
/// ```
///
/// ### Responses
/// - `200 OK` with the practical
/// - `400 Bad Request` (blank fields, or a code link outside the repository)
/// - `404 Not Found`
/// - `409 Conflict` (the file kept changing underneath the update)
/// - `502 Bad Gateway`
pub async fn update_practical(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePracticalRequest>,
) -> Result<Json<ApiResponse<PracticalModel>>, ApiError> {
    let practical = app_state
        .practicals()
        .update(
            &user.identity(),
            id,
            UpdatePractical {
                title: req.title,
                description: req.description,
                code: req.code,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(practical, "Practical updated successfully")))
}

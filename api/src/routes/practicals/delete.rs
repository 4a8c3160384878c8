use crate::auth::AuthUser;
use crate::response::{ApiResponse, Empty};
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
};

/// DELETE /practicals/{id}
///
/// Removes the published file (if still present) and the record. Admin only.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
/// - `502 Bad Gateway`
pub async fn delete_practical(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    app_state.practicals().delete(&user.identity(), id).await?;
    Ok(Json(ApiResponse::success(Empty::default(), "Practical deleted successfully")))
}

use super::common::AdminResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;
use axum::{Extension, Json, extract::State, http::StatusCode, response::Response};
use db::models::admin::Model as AdminModel;

/// GET /auth/me
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "email": "admin@example.com",
///     "created_at": "2025-05-23T18:00:00Z",
///     "updated_at": "2025-05-23T18:00:00Z"
///   },
///   "message": "Admin data retrieved successfully"
/// }
/// ```
/// - `404 Not Found` when the token outlived its account
pub async fn get_me(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<AdminResponse>>, Response> {
    let admin = AdminModel::find_by_id(app_state.db(), claims.sub)
        .await
        .map_err(|e| {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}"))
        })?
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Admin not found"))?;

    Ok(Json(ApiResponse::success(
        AdminResponse::from(admin),
        "Admin data retrieved successfully",
    )))
}

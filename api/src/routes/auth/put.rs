use super::common::AdminResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;
use axum::{Extension, Json, extract::State, http::StatusCode, response::Response};
use db::models::admin::Model as AdminModel;
use sea_orm::DbErr;
use serde::Deserialize;
use services::error::format_validation_errors;
use tracing::info;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// PUT /auth/me
///
/// Changes the signed-in admin's email and/or password.
///
/// ### Request Body
/// ```json
/// { "email": "new@example.com", "password": "newpassword" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated profile
/// - `400 Bad Request` (nothing to change, or validation failure)
/// - `404 Not Found`
pub async fn update_me(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<UpdateMeRequest>,
) -> Result<Json<ApiResponse<AdminResponse>>, Response> {
    if req.email.is_none() && req.password.is_none() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Provide an email or a password to update",
        ));
    }
    req.validate().map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e))
    })?;

    let email = req.email.as_deref().map(str::trim);
    let admin = AdminModel::update_profile(app_state.db(), claims.sub, email, req.password.as_deref())
        .await
        .map_err(|e| match e {
            DbErr::RecordNotFound(_) => error_response(StatusCode::NOT_FOUND, "Admin not found"),
            e => error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}")),
        })?;
    info!(admin_id = admin.id, "Admin profile updated");

    Ok(Json(ApiResponse::success(
        AdminResponse::from(admin),
        "Profile updated successfully",
    )))
}
